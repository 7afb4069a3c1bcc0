//! Uncertainty boxes and the line/box crossing predicate.

use crate::types::DataPoint;
use nalgebra::Vector2;
use serde::Serialize;

/// Axis-aligned uncertainty box centered on a measurement.
///
/// `min`/`max` are the bottom-left and top-right corners. A box may collapse
/// to a segment or a single point when an uncertainty is zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UncertaintyBox {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl UncertaintyBox {
    pub fn from_point(p: &DataPoint) -> Self {
        Self {
            min: Vector2::new(p.x - p.dx, p.y - p.dy),
            max: Vector2::new(p.x + p.dx, p.y + p.dy),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Sign of the corner residual, with zero kept distinct.
///
/// An explicit three-way sign is required here: the zero case short-circuits
/// the predicate, and division-based sign proxies misbehave for negative
/// fractional residuals.
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Does the infinite line `y = slope·x + intercept` cross the box?
///
/// Evaluates `f(px, py) = slope·px + intercept − py` at the four corners.
/// A zero at any corner means the line touches the box. Otherwise the line
/// crosses iff some pair of diagonally opposite corners sits on opposite
/// sides of the line. Degenerate boxes go through the same path: a collapsed
/// box is crossed only when the line meets the remaining segment or point.
pub fn line_crosses_box(slope: f64, intercept: f64, bbox: &UncertaintyBox) -> bool {
    let f = |px: f64, py: f64| slope * px + intercept - py;

    let bottom_left = f(bbox.min.x, bbox.min.y);
    let top_left = f(bbox.min.x, bbox.max.y);
    let bottom_right = f(bbox.max.x, bbox.min.y);
    let top_right = f(bbox.max.x, bbox.max.y);

    if bottom_left == 0.0 || top_left == 0.0 || bottom_right == 0.0 || top_right == 0.0 {
        return true;
    }

    sign(top_left) != sign(bottom_right) || sign(top_right) != sign(bottom_left)
}

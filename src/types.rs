use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by envelope computation.
///
/// Degenerate uncertainty boxes (`dx == 0` or `dy == 0`) are *not* errors:
/// the crossing predicate handles collapsed rectangles through the same
/// corner-evaluation path as regular ones.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The point set is empty; there is nothing to fit.
    #[error("point set is empty")]
    InsufficientData,
    /// The scan completed but no candidate line crossed every uncertainty
    /// box. A legitimate outcome for inconsistent or zero-area data, not a
    /// crash.
    #[error("no line crosses every uncertainty box")]
    NoConsistentLine,
    /// A point carries a negative or non-finite field.
    #[error("point {index} has a negative uncertainty or non-finite value")]
    InvalidPoint { index: usize },
}

/// One measurement with independent rectangular uncertainty.
///
/// `dx` and `dy` are half-widths: the true value is believed to lie inside
/// the axis-aligned box `[x - dx, x + dx] × [y - dy, y + dy]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self { x, y, dx, dy }
    }

    /// A measurement with zero uncertainty on both axes.
    pub fn exact(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }

    fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.dx.is_finite()
            && self.dy.is_finite()
            && self.dx >= 0.0
            && self.dy >= 0.0
    }
}

/// Ordered, immutable sequence of measurements, `n ≥ 1`.
///
/// Construction validates every point; a `PointSet` that exists is always a
/// legal solver input. Point order is preserved because it determines corner
/// enumeration order and therefore which equally-extreme candidate wins a
/// tie.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointSet {
    points: Vec<DataPoint>,
}

impl PointSet {
    pub fn new(points: Vec<DataPoint>) -> Result<Self, EnvelopeError> {
        if points.is_empty() {
            return Err(EnvelopeError::InsufficientData);
        }
        for (index, p) in points.iter().enumerate() {
            if !p.is_valid() {
                return Err(EnvelopeError::InvalidPoint { index });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// X-span of the data extended by the first and last point's
    /// x-uncertainty. Boundary lines are drawn across this span only.
    pub fn display_span(&self) -> (f64, f64) {
        let first = self.points.first().unwrap();
        let last = self.points.last().unwrap();
        (first.x - first.dx, last.x + last.dx)
    }
}

/// Finished envelope: the shallowest and steepest lines that cross every
/// uncertainty box, and the derived mean slope ± uncertainty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtremalFit {
    pub min_slope: f64,
    pub min_intercept: f64,
    pub max_slope: f64,
    pub max_intercept: f64,
    pub mean_slope: f64,
    pub slope_uncertainty: f64,
}

impl ExtremalFit {
    pub(crate) fn from_extremes(
        min_slope: f64,
        min_intercept: f64,
        max_slope: f64,
        max_intercept: f64,
    ) -> Self {
        Self {
            min_slope,
            min_intercept,
            max_slope,
            max_intercept,
            mean_slope: (max_slope + min_slope) / 2.0,
            slope_uncertainty: (max_slope - min_slope) / 2.0,
        }
    }

    /// The two boundary lines clipped to the data's display span, ready for
    /// a plotting collaborator. Order: shallowest line first.
    pub fn boundary_segments(&self, points: &PointSet) -> [BoundarySegment; 2] {
        let (x0, x1) = points.display_span();
        [
            BoundarySegment::from_line(self.min_slope, self.min_intercept, x0, x1),
            BoundarySegment::from_line(self.max_slope, self.max_intercept, x0, x1),
        ]
    }

    pub fn min_equation(&self) -> String {
        format_line(self.min_slope, self.min_intercept)
    }

    pub fn max_equation(&self) -> String {
        format_line(self.max_slope, self.max_intercept)
    }

    /// The slope result in `m ± Δm` form.
    pub fn mean_equation(&self) -> String {
        format!("m = {} ± {}", self.mean_slope, self.slope_uncertainty)
    }

    /// Tabular rendition of the six scalars for the export collaborator.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        vec![
            vec![
                "min".to_string(),
                self.min_slope.to_string(),
                self.min_intercept.to_string(),
            ],
            vec![
                "max".to_string(),
                self.max_slope.to_string(),
                self.max_intercept.to_string(),
            ],
            vec![
                "mean".to_string(),
                self.mean_slope.to_string(),
                self.slope_uncertainty.to_string(),
            ],
        ]
    }
}

fn format_line(slope: f64, intercept: f64) -> String {
    if intercept < 0.0 {
        format!("y = {}·x - {}", slope, -intercept)
    } else {
        format!("y = {}·x + {}", slope, intercept)
    }
}

/// A boundary line clipped to the visible data span.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundarySegment {
    pub p0: [f64; 2],
    pub p1: [f64; 2],
}

impl BoundarySegment {
    fn from_line(slope: f64, intercept: f64, x0: f64, x1: f64) -> Self {
        Self {
            p0: [x0, slope * x0 + intercept],
            p1: [x1, slope * x1 + intercept],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            PointSet::new(Vec::new()).unwrap_err(),
            EnvelopeError::InsufficientData
        );
    }

    #[test]
    fn negative_uncertainty_is_rejected() {
        let err = PointSet::new(vec![
            DataPoint::exact(0.0, 0.0),
            DataPoint::new(1.0, 1.0, -0.1, 0.0),
        ])
        .unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidPoint { index: 1 });
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let err = PointSet::new(vec![DataPoint::new(f64::NAN, 0.0, 0.0, 0.0)]).unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidPoint { index: 0 });
    }

    #[test]
    fn display_span_extends_by_edge_uncertainties() {
        let points = PointSet::new(vec![
            DataPoint::new(1.0, 1.0, 0.5, 0.1),
            DataPoint::new(2.0, 2.0, 0.0, 0.1),
            DataPoint::new(4.0, 4.0, 0.25, 0.1),
        ])
        .unwrap();
        assert_eq!(points.display_span(), (0.5, 4.25));
    }

    #[test]
    fn derived_fields_follow_extremes() {
        let fit = ExtremalFit::from_extremes(1.0, 0.5, 3.0, -0.5);
        assert_eq!(fit.mean_slope, 2.0);
        assert_eq!(fit.slope_uncertainty, 1.0);
        assert_eq!(fit.max_equation(), "y = 3·x - 0.5");
        assert_eq!(fit.min_equation(), "y = 1·x + 0.5");
    }

    #[test]
    fn boundary_segments_are_clipped_to_span() {
        let points = PointSet::new(vec![
            DataPoint::new(0.0, 0.0, 1.0, 1.0),
            DataPoint::new(10.0, 10.0, 2.0, 1.0),
        ])
        .unwrap();
        let fit = ExtremalFit::from_extremes(1.0, 0.0, 2.0, 0.0);
        let [lo, hi] = fit.boundary_segments(&points);
        assert_eq!(lo.p0, [-1.0, -1.0]);
        assert_eq!(lo.p1, [12.0, 12.0]);
        assert_eq!(hi.p0, [-1.0, -2.0]);
        assert_eq!(hi.p1, [12.0, 24.0]);
    }
}

//! Candidate enumeration and extremal tracking.
//!
//! All unordered corner pairs `(i, j)`, `i < j`, with distinct x-coordinates
//! define candidate lines. Pairs sharing an x are skipped: vertical lines
//! have no slope/intercept form and are out of scope. A candidate only
//! replaces a running extreme if it strictly improves it *and* crosses every
//! uncertainty box, so the first extreme found in enumeration order survives
//! ties. The running extremes live in `Option`s; no ±inf sentinels exist
//! anywhere.

use crate::geometry::{line_crosses_box, UncertaintyBox};
use crate::types::PointSet;
use nalgebra::Vector2;

/// A validated extreme: the line plus the ordinal of the corner pair that
/// produced it. The ordinal gives parallel merges a total order that
/// reproduces the sequential first-found-wins tie-break.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Extreme {
    pub slope: f64,
    pub intercept: f64,
    pub pair_index: usize,
}

#[derive(Debug, Default)]
pub(crate) struct ScanOutcome {
    pub min: Option<Extreme>,
    pub max: Option<Extreme>,
    /// Non-vertical corner pairs examined.
    pub candidates: usize,
    /// Full validity checks performed.
    pub validations: usize,
}

pub(crate) fn scan(points: &PointSet, corners: &[Vector2<f64>]) -> ScanOutcome {
    let boxes: Vec<UncertaintyBox> = points.iter().map(UncertaintyBox::from_point).collect();

    #[cfg(feature = "parallel")]
    {
        scan_parallel(&boxes, corners)
    }
    #[cfg(not(feature = "parallel"))]
    {
        scan_stripes(&boxes, corners, 0..corners.len())
    }
}

/// Scans the pair stripes `(i, j > i)` for each `i` in `rows`, in order.
#[cfg(not(feature = "parallel"))]
fn scan_stripes(
    boxes: &[UncertaintyBox],
    corners: &[Vector2<f64>],
    rows: std::ops::Range<usize>,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for i in rows {
        scan_stripe(boxes, corners, i, &mut outcome);
    }
    outcome
}

/// Scans every pair `(i, j)` with `j > i` for a fixed first corner `i`.
fn scan_stripe(
    boxes: &[UncertaintyBox],
    corners: &[Vector2<f64>],
    i: usize,
    outcome: &mut ScanOutcome,
) {
    let n = corners.len();
    // Ordinal of pair (i, i + 1) in the global (i, j) enumeration.
    let stripe_base = i * n - i * (i + 1) / 2;

    let a = corners[i];
    for (offset, &b) in corners[i + 1..].iter().enumerate() {
        if a.x == b.x {
            continue;
        }
        outcome.candidates += 1;

        let slope = (b.y - a.y) / (b.x - a.x);
        let intercept = a.y - slope * a.x;

        let improves_min = outcome.min.is_none_or(|best| slope < best.slope);
        let improves_max = outcome.max.is_none_or(|best| slope > best.slope);
        if !improves_min && !improves_max {
            continue;
        }

        outcome.validations += 1;
        if !boxes
            .iter()
            .all(|bbox| line_crosses_box(slope, intercept, bbox))
        {
            continue;
        }

        let extreme = Extreme {
            slope,
            intercept,
            pair_index: stripe_base + offset,
        };
        if improves_min {
            outcome.min = Some(extreme);
        }
        if improves_max {
            outcome.max = Some(extreme);
        }
    }
}

#[cfg(feature = "parallel")]
fn scan_parallel(boxes: &[UncertaintyBox], corners: &[Vector2<f64>]) -> ScanOutcome {
    use rayon::prelude::*;

    (0..corners.len())
        .into_par_iter()
        .map(|i| {
            let mut outcome = ScanOutcome::default();
            scan_stripe(boxes, corners, i, &mut outcome);
            outcome
        })
        .reduce(ScanOutcome::default, merge)
}

/// Merges partial scan outcomes under a deterministic total order so that
/// parallel and sequential scans report the same extremes: smaller (larger)
/// slope wins for the minimum (maximum), ties go to the earlier pair.
#[cfg(feature = "parallel")]
fn merge(a: ScanOutcome, b: ScanOutcome) -> ScanOutcome {
    fn pick(
        a: Option<Extreme>,
        b: Option<Extreme>,
        prefer: impl Fn(&Extreme, &Extreme) -> bool,
    ) -> Option<Extreme> {
        match (a, b) {
            (Some(x), Some(y)) => {
                if prefer(&y, &x) {
                    Some(y)
                } else {
                    Some(x)
                }
            }
            (x, y) => x.or(y),
        }
    }

    ScanOutcome {
        min: pick(a.min, b.min, |y, x| {
            y.slope < x.slope || (y.slope == x.slope && y.pair_index < x.pair_index)
        }),
        max: pick(a.max, b.max, |y, x| {
            y.slope > x.slope || (y.slope == x.slope && y.pair_index < x.pair_index)
        }),
        candidates: a.candidates + b.candidates,
        validations: a.validations + b.validations,
    }
}

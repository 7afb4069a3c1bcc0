//! Max-min slope envelope solver.
//!
//! Enumerates every line through a pair of uncertainty-box corners and keeps
//! the shallowest and steepest lines that cross **every** box. The scan is
//! `O(n²)` corner pairs, each validated against `n` boxes, so `O(n³)` in the
//! point count — intentional brute force, fine for lab-scale datasets (tens
//! to low hundreds of points). Do not feed it thousands of points.

mod scan;

use crate::corners::expand_corners;
use crate::types::{EnvelopeError, ExtremalFit, PointSet};
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Envelope computation with scan diagnostics attached.
#[derive(Clone, Debug, Serialize)]
pub struct EnvelopeReport {
    pub found: bool,
    pub fit: Option<ExtremalFit>,
    /// Non-vertical corner pairs examined.
    pub candidates: usize,
    /// Full per-box validity checks actually run (improving candidates only).
    pub validations: usize,
    pub latency_ms: f64,
}

/// Computes slope envelopes over a [`PointSet`].
///
/// The solver is stateless; a given point set always yields the same result,
/// bit for bit, whether or not the `parallel` feature is active.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvelopeSolver;

impl EnvelopeSolver {
    pub fn new() -> Self {
        Self
    }

    /// Computes the envelope, treating "no consistent line" as an error.
    pub fn compute(&self, points: &PointSet) -> Result<ExtremalFit, EnvelopeError> {
        self.compute_report(points)?
            .fit
            .ok_or(EnvelopeError::NoConsistentLine)
    }

    /// Computes the envelope and returns scan diagnostics alongside the fit.
    ///
    /// A completed scan with no valid candidate is reported as
    /// `found == false` with `fit == None`, never as sentinel slopes.
    pub fn compute_report(&self, points: &PointSet) -> Result<EnvelopeReport, EnvelopeError> {
        if points.is_empty() {
            return Err(EnvelopeError::InsufficientData);
        }

        let t0 = Instant::now();
        let corners = expand_corners(points);
        let outcome = scan::scan(points, &corners);
        let latency_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let fit = match (outcome.min, outcome.max) {
            (Some(min), Some(max)) => Some(ExtremalFit::from_extremes(
                min.slope,
                min.intercept,
                max.slope,
                max.intercept,
            )),
            _ => None,
        };

        match &fit {
            Some(f) => debug!(
                "envelope: slopes [{}, {}] from {} candidates in {:.3} ms",
                f.min_slope, f.max_slope, outcome.candidates, latency_ms
            ),
            None => warn!(
                "envelope: no candidate line crosses every uncertainty box \
                 ({} candidates examined)",
                outcome.candidates
            ),
        }

        Ok(EnvelopeReport {
            found: fit.is_some(),
            fit,
            candidates: outcome.candidates,
            validations: outcome.validations,
            latency_ms,
        })
    }
}

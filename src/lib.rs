#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod dataset;
pub mod envelope;
pub mod export;
pub mod types;

// Lower-level building blocks – public so tools and tests can reach them,
// but considered unstable internals.
pub mod config;
pub mod corners;
pub mod geometry;

// --- High-level re-exports -------------------------------------------------

// Main entry points: solver + results.
pub use crate::envelope::{EnvelopeReport, EnvelopeSolver};
pub use crate::types::{BoundarySegment, DataPoint, EnvelopeError, ExtremalFit, PointSet};

// Import collaborator: CSV tables and uncertainty-source resolution.
pub use crate::dataset::{DataTable, UncertaintySource};

/// Small prelude for quick experiments.
///
/// ```
/// use slope_envelope::prelude::*;
///
/// # fn main() -> Result<(), EnvelopeError> {
/// let points = PointSet::new(vec![
///     DataPoint::new(0.0, 0.0, 0.5, 0.5),
///     DataPoint::new(2.0, 4.0, 0.5, 0.5),
/// ])?;
/// let fit = EnvelopeSolver::default().compute(&points)?;
/// assert!(fit.min_slope <= 2.0 && 2.0 <= fit.max_slope);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::envelope::{EnvelopeReport, EnvelopeSolver};
    pub use crate::types::{DataPoint, EnvelopeError, ExtremalFit, PointSet};
}

//! CSV import and uncertainty-source resolution.
//!
//! The solver only ever sees a resolved [`PointSet`]; this module is the
//! collaborator that turns a spreadsheet and a choice of uncertainty sources
//! into one. Uncertainties may be a constant half-width, a fraction of each
//! measurement, or a dedicated column — always resolved to concrete `dx`/`dy`
//! arrays before any geometry runs.

use crate::types::{DataPoint, EnvelopeError, PointSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("column {name:?} not found (available: {available:?})")]
    MissingColumn { name: String, available: Vec<String> },
    #[error("row {row}, column {column:?}: {value:?} is not a number")]
    NonNumericCell {
        row: usize,
        column: String,
        value: String,
    },
    #[error("uncertainty value {value} must be finite and non-negative")]
    InvalidUncertainty { value: f64 },
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// A headered table of cells kept as text; columns are parsed on demand so
/// non-numeric columns are fine as long as nobody selects them.
#[derive(Clone, Debug)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let wrap = |source: csv::Error| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
        let headers = reader
            .headers()
            .map_err(wrap)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(wrap)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        debug!(
            "dataset: loaded {} with {} rows",
            path.display(),
            rows.len()
        );
        Ok(Self { headers, rows })
    }

    /// Builds a table from in-memory cells; used by tests and by callers that
    /// already hold the data.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Parses the named column as `f64` values.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, DatasetError> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn {
                name: name.to_string(),
                available: self.headers.clone(),
            })?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (row, cells) in self.rows.iter().enumerate() {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let value = cell
                .trim()
                .parse::<f64>()
                .map_err(|_| DatasetError::NonNumericCell {
                    row,
                    column: name.to_string(),
                    value: cell.to_string(),
                })?;
            values.push(value);
        }
        Ok(values)
    }
}

/// Where an axis's uncertainty comes from.
///
/// Resolved into a concrete half-width per measurement before the solver
/// runs; the solver itself never sees this enum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UncertaintySource {
    /// The same half-width for every measurement.
    Constant { value: f64 },
    /// A fraction of each measurement's magnitude: `factor · |value|`.
    Relative { factor: f64 },
    /// Per-measurement half-widths from a table column.
    Column { name: String },
}

impl Default for UncertaintySource {
    fn default() -> Self {
        Self::Constant { value: 0.0 }
    }
}

impl UncertaintySource {
    /// Resolves this source into one half-width per measurement.
    ///
    /// `values` are the measurements on the same axis, used by the relative
    /// form. `|value|` keeps half-widths non-negative for negative
    /// measurements.
    pub fn resolve(&self, table: &DataTable, values: &[f64]) -> Result<Vec<f64>, DatasetError> {
        match self {
            Self::Constant { value } => {
                check_half_width(*value)?;
                Ok(vec![*value; values.len()])
            }
            Self::Relative { factor } => {
                check_half_width(*factor)?;
                Ok(values.iter().map(|v| factor * v.abs()).collect())
            }
            Self::Column { name } => {
                let widths = table.column(name)?;
                for w in &widths {
                    check_half_width(*w)?;
                }
                Ok(widths)
            }
        }
    }
}

fn check_half_width(value: f64) -> Result<(), DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DatasetError::InvalidUncertainty { value })
    }
}

/// Pulls the selected columns out of `table`, resolves both uncertainty
/// sources, and assembles the solver input.
pub fn load_points(
    table: &DataTable,
    x_column: &str,
    y_column: &str,
    dx_source: &UncertaintySource,
    dy_source: &UncertaintySource,
) -> Result<PointSet, DatasetError> {
    let xs = table.column(x_column)?;
    let ys = table.column(y_column)?;
    let dxs = dx_source.resolve(table, &xs)?;
    let dys = dy_source.resolve(table, &ys)?;

    let points = xs
        .into_iter()
        .zip(ys)
        .zip(dxs.into_iter().zip(dys))
        .map(|((x, y), (dx, dy))| DataPoint::new(x, y, dx, dy))
        .collect();
    Ok(PointSet::new(points)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_rows(
            vec!["t".into(), "v".into(), "dv".into()],
            vec![
                vec!["0.0".into(), "1.0".into(), "0.1".into()],
                vec!["1.0".into(), "-3.0".into(), "0.2".into()],
                vec!["2.0".into(), "5.0".into(), "0.3".into()],
            ],
        )
    }

    #[test]
    fn constant_source_repeats_value() {
        let t = table();
        let xs = t.column("t").unwrap();
        let dxs = UncertaintySource::Constant { value: 0.5 }
            .resolve(&t, &xs)
            .unwrap();
        assert_eq!(dxs, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn relative_source_uses_magnitude() {
        let t = table();
        let vs = t.column("v").unwrap();
        let dvs = UncertaintySource::Relative { factor: 0.1 }
            .resolve(&t, &vs)
            .unwrap();
        assert_eq!(dvs[0], 0.1);
        // Negative measurement still gets a non-negative half-width.
        assert!((dvs[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn column_source_reads_the_table() {
        let t = table();
        let vs = t.column("v").unwrap();
        let dvs = UncertaintySource::Column { name: "dv".into() }
            .resolve(&t, &vs)
            .unwrap();
        assert_eq!(dvs, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn missing_column_is_reported_with_alternatives() {
        let t = table();
        let err = t.column("speed").unwrap_err();
        match err {
            DatasetError::MissingColumn { name, available } => {
                assert_eq!(name, "speed");
                assert_eq!(available.len(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_reported_with_position() {
        let t = DataTable::from_rows(
            vec!["t".into()],
            vec![vec!["1.0".into()], vec!["n/a".into()]],
        );
        let err = t.column("t").unwrap_err();
        match err {
            DatasetError::NonNumericCell { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "t");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_constant_is_rejected() {
        let t = table();
        let err = UncertaintySource::Constant { value: -1.0 }
            .resolve(&t, &[0.0])
            .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidUncertainty { .. }));
    }

    #[test]
    fn load_points_assembles_a_point_set() {
        let t = table();
        let points = load_points(
            &t,
            "t",
            "v",
            &UncertaintySource::Constant { value: 0.25 },
            &UncertaintySource::Column { name: "dv".into() },
        )
        .unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.points()[1], DataPoint::new(1.0, -3.0, 0.25, 0.2));
    }

    #[test]
    fn uncertainty_source_round_trips_through_json() {
        let src = UncertaintySource::Column { name: "dv".into() };
        let json = serde_json::to_string(&src).unwrap();
        assert_eq!(json, r#"{"kind":"column","name":"dv"}"#);
        let back: UncertaintySource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, src);
    }
}

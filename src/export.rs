//! Tabular export of results.
//!
//! Downstream persistence collaborator: takes arbitrary header + rows and
//! writes them out. The envelope types provide their own tabular renditions
//! ([`crate::ExtremalFit::to_rows`]).

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Writes a header row followed by data rows to a CSV file.
pub fn write_csv<S: AsRef<str>>(
    path: &Path,
    headers: &[S],
    rows: &[Vec<String>],
) -> Result<(), ExportError> {
    let wrap = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
    writer
        .write_record(headers.iter().map(AsRef::as_ref))
        .map_err(wrap)?;
    for row in rows {
        writer.write_record(row).map_err(wrap)?;
    }
    writer.flush().map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_headers_and_rows() {
        let path = std::env::temp_dir().join("slope_envelope_export_test.csv");
        let rows = vec![
            vec!["min".to_string(), "1.5".to_string()],
            vec!["max".to_string(), "2.5".to_string()],
        ];
        write_csv(&path, &["line", "slope"], &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "line,slope\nmin,1.5\nmax,2.5\n");
        let _ = fs::remove_file(&path);
    }
}

//! CSV writers for fields and tables.

use crate::{ResultsError, ResultsResult};
use nalgebra::DMatrix;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Write a matrix as CSV: one header line of column indices, then one line per row.
pub fn write_matrix_csv(path: &Path, matrix: &DMatrix<f64>) -> ResultsResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let header: Vec<String> = (0..matrix.ncols()).map(|j| j.to_string()).collect();
    writer.write_record(&header)?;

    for row in matrix.row_iter() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    debug!(
        path = %path.display(),
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        "wrote matrix csv"
    );
    Ok(())
}

/// Write serializable rows as CSV; the header comes from the field names.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> ResultsResult<()> {
    if rows.is_empty() {
        return Err(ResultsError::Malformed {
            message: format!("no rows to write to {}", path.display()),
        });
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = rows.len(), "wrote table csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        r: f64,
        #[serde(rename = "I_sp (s)")]
        isp: f64,
    }

    fn temp_file(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("at_results_export");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn matrix_has_header_and_rows() {
        let path = temp_file("matrix.csv");
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.5, 5.0, -6.0]);
        write_matrix_csv(&path, &m).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["0,1,2", "1,2,3", "4.5,5,-6"]);
    }

    #[test]
    fn table_uses_renamed_headers() {
        let path = temp_file("table.csv");
        let rows = vec![
            Row { r: 8.0, isp: 402.55 },
            Row { r: 6.0, isp: 429.77 },
        ];
        write_table(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("r,I_sp (s)"));
        assert_eq!(lines.next(), Some("8.0,402.55"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let path = temp_file("empty.csv");
        let rows: Vec<Row> = Vec::new();
        assert!(matches!(
            write_table(&path, &rows),
            Err(ResultsError::Malformed { .. })
        ));
    }
}

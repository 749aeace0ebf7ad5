use std::path::Path;

use ndarray::{Array1, Array2};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{errors::{DataError, DataResult}, type_lib::NumericData};

fn read_text(path: &Path) -> DataResult<String> {
    debug!(path = %path.display(), "reading table");
    std::fs::read_to_string(path).map_err(|err| DataError::from_io(path, err))
}

/// Parses a whitespace-delimited numeric table. Blank lines and `#` comments
/// are ignored; the first `skip_rows` lines are dropped before parsing.
pub fn parse_table(text: &str, skip_rows: usize, path: &Path) -> DataResult<Array2<NumericData>> {
    let mut values = Vec::new();
    let mut n_cols = None;
    let mut n_rows = 0;

    for (line_no, line) in text.lines().enumerate().skip(skip_rows) {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let row = content
            .split_whitespace()
            .map(|field| field.parse::<NumericData>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| DataError::malformed(path, format!("line {}: {err}", line_no + 1)))?;

        match n_cols {
            None => n_cols = Some(row.len()),
            Some(cols) if cols != row.len() => {
                return Err(DataError::malformed(
                    path,
                    format!("line {} has {} columns, expected {cols}", line_no + 1, row.len()),
                ));
            }
            Some(_) => {}
        }
        values.extend(row);
        n_rows += 1;
    }

    Array2::from_shape_vec((n_rows, n_cols.unwrap_or(0)), values)
        .map_err(|err| DataError::malformed(path, err.to_string()))
}

pub fn read_table(path: &Path, skip_rows: usize) -> DataResult<Array2<NumericData>> {
    parse_table(&read_text(path)?, skip_rows, path)
}

/// Reads a file holding a single row or a single column of values.
pub fn read_vector(path: &Path) -> DataResult<Array1<NumericData>> {
    let table = read_table(path, 0)?;
    Ok(Array1::from_iter(table.iter().copied()))
}

/// Last row of a table; a single-row file is its own last row.
pub fn read_last_row(path: &Path) -> DataResult<Array1<NumericData>> {
    let table = read_table(path, 0)?;
    match table.nrows() {
        0 => Err(DataError::malformed(path, "table is empty")),
        n => Ok(table.row(n - 1).to_owned()),
    }
}

/// Reads a JSON document, keeping missing files and parse failures apart.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    debug!(path = %path.display(), "reading metadata");
    let file = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => DataError::MetadataNotFound(path.to_path_buf()),
        _ => DataError::Io { path: path.to_path_buf(), source: err },
    })?;
    serde_json::from_str(&file).map_err(|source| DataError::MetadataMalformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ragged_whitespace() {
        let table = parse_table("1  2\t3\n\n4 5 6   \n", 0, Path::new("t")).unwrap();
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table[[1, 2]], 6.0);
    }

    #[test]
    fn skips_header_and_comments() {
        let text = "x y Ttt\n# produced by solver\n0.5 1e-3 2 # trailing\n";
        let table = parse_table(text, 1, Path::new("t")).unwrap();
        assert_eq!(table.shape(), &[1, 3]);
        assert_eq!(table[[0, 1]], 1e-3);
    }

    #[test]
    fn rejects_inconsistent_rows() {
        let err = parse_table("1 2\n3\n", 0, Path::new("t")).unwrap_err();
        assert!(matches!(err, DataError::MalformedDataset { .. }));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_table("1 two\n", 0, Path::new("t")).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}

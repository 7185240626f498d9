//! Shared CSV plumbing for the pipeline's file formats.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Open a headed CSV file and check that every required column is present.
pub(crate) fn open_reader(path: &Path, required: &[&'static str]) -> Result<csv::Reader<File>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| Error::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader.headers().map_err(|source| Error::CsvRead {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(Error::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    Ok(reader)
}

/// Deserialize every record, reporting failures with their line number.
pub(crate) fn read_records<T: DeserializeOwned>(
    reader: &mut csv::Reader<File>,
    path: &Path,
) -> Result<Vec<T>> {
    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(line_num, result)| {
            result.map_err(|e| Error::InvalidRecord {
                path: path.to_path_buf(),
                message: format!("line {}: {e}", line_num + 2),
            })
        })
        .collect()
}

/// Write a CSV file with an explicit header, so that an empty table is
/// still a valid header-only file.
pub(crate) fn write_table<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let csv_err = |source| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(header).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reject negative and non-finite values of a time or count column.
pub(crate) fn check_non_negative(path: &Path, line: usize, column: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidRecord {
            path: path.to_path_buf(),
            message: format!("line {line}: {column} must be a non-negative number, got {value}"),
        })
    }
}

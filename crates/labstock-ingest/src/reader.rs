//! CSV loading into a string-typed DataFrame.
//!
//! Every column is loaded as nullable text; typing (quantities, dates) is
//! the normalizer's job so that malformed cells degrade instead of failing
//! the whole file.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (100 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(metadata.len())
}

/// Rejects UTF-16 files, which the CSV reader would decode as garbage.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Reads an inventory CSV into a DataFrame of nullable string columns.
///
/// The first non-blank row is the header. Blank cells become nulls, rows
/// that are entirely blank are skipped, and short rows are padded.
/// An empty file yields an empty DataFrame.
pub fn read_inventory_csv(path: &Path) -> Result<DataFrame> {
    let size = check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)?;
    if size == 0 {
        warn!(path = %path.display(), "inventory file is empty");
        return Ok(DataFrame::empty());
    }
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        warn!(path = %path.display(), "inventory file has no rows");
        return Ok(DataFrame::empty());
    };
    let headers = unique_headers(&header_row);
    let body: Vec<Vec<String>> = rows.collect();
    let df = frame_from_rows(&headers, &body)?;
    info!(
        path = %path.display(),
        columns = df.width(),
        rows = df.height(),
        "inventory file loaded"
    );
    Ok(df)
}

/// Builds a DataFrame of nullable string columns from header and row vectors.
///
/// Blank cells become nulls; missing trailing cells are treated as blank and
/// extra cells beyond the header width are dropped.
pub fn frame_from_rows(headers: &[String], rows: &[Vec<String>]) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let values: Vec<Option<String>> = rows
            .iter()
            .map(|row| {
                row.get(idx)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
            .collect();
        columns.push(Series::new(header.as_str().into(), values).into());
    }
    if rows.iter().any(|row| row.len() > headers.len()) {
        debug!(width = headers.len(), "dropped cells beyond header width");
    }
    Ok(DataFrame::new(columns)?)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Makes header names unique and non-empty the way spreadsheet readers do:
/// blanks become `Unnamed: <idx>`, repeats get a `.1`, `.2`, ... suffix.
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let base = if value.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            value.split_whitespace().collect::<Vec<_>>().join(" ")
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while !seen.insert(name.clone()) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(name);
    }
    headers
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn csv_error(path: &Path, e: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

//! CSV serialization of report frames.

use std::path::Path;

use anyhow::{Context, Result};
use labstock_ingest::any_to_string;
use polars::prelude::{AnyValue, DataFrame};

/// Writes `df` as comma-separated text with a header row.
///
/// Nulls become empty fields. Numbers are written without a trailing
/// fractional zero.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_frame(df, &mut writer).with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Renders `df` to a CSV string, same layout as [`write_csv`].
pub fn frame_to_csv_string(df: &DataFrame) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    write_frame(df, &mut writer)?;
    let bytes = writer.into_inner().context("finish csv buffer")?;
    String::from_utf8(bytes).context("csv output is not UTF-8")
}

fn write_frame<W: std::io::Write>(df: &DataFrame, writer: &mut csv::Writer<W>) -> Result<()> {
    let headers: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    writer.write_record(&headers)?;
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        writer.write_record(&record)?;
    }
    Ok(())
}

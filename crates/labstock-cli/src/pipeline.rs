//! Command pipelines, independent of argument parsing and terminal output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use labstock_config::{InventoryConfig, load_config};
use labstock_core::{InventorySession, RecordEdit, reference_date};
use labstock_ingest::{column_names, read_inventory_csv};
use labstock_map::{ColumnMapping, detect_columns};
use labstock_report::ReportTables;
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use crate::types::{CheckResult, ColumnsResult, ReportResult};

/// Where the inventory comes from and how to read it.
#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub input: PathBuf,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// `FIELD=COLUMN` overrides applied after detection.
    pub mappings: Vec<String>,
}

/// Settings for [`run_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub input: InputOptions,
    /// `ROW:FIELD=VALUE` edits, applied as one batch.
    pub edits: Vec<String>,
    /// Reference date; the local date when unset.
    pub today: Option<NaiveDate>,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// Loaded configuration, source frame and the column mapping to apply.
#[derive(Debug)]
pub struct LoadedInput {
    pub config: InventoryConfig,
    pub frame: DataFrame,
    pub columns: Vec<String>,
    pub mapping: ColumnMapping,
}

/// Loads configuration and input, then detects and overrides the mapping.
pub fn load_input(options: &InputOptions) -> Result<LoadedInput> {
    let config = load_config(options.config.as_deref()).context("load configuration")?;
    let frame = read_inventory_csv(&options.input)
        .with_context(|| format!("read {}", options.input.display()))?;
    let columns = column_names(&frame);
    let mut mapping = detect_columns(&columns, &config.columns);
    mapping
        .apply_overrides(&options.mappings)
        .context("apply column overrides")?;
    if !options.mappings.is_empty() {
        debug!(overrides = options.mappings.len(), "column overrides applied");
    }
    Ok(LoadedInput {
        config,
        frame,
        columns,
        mapping,
    })
}

/// Parses every edit expression before any is applied.
pub fn parse_edits(edits: &[String]) -> Result<Vec<RecordEdit>> {
    edits
        .iter()
        .map(|raw| {
            raw.parse::<RecordEdit>()
                .with_context(|| format!("parse edit `{raw}`"))
        })
        .collect()
}

/// Export directory used when none is given: `output/` beside the input.
pub fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from("output"), |parent| parent.join("output"))
}

/// Runs the full pipeline: classify, edit, aggregate and export.
pub fn run_report(options: &ReportOptions) -> Result<ReportResult> {
    let input = &options.input.input;
    let span = info_span!("report", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let loaded = load_input(&options.input)?;
    let edits = parse_edits(&options.edits)?;
    let today = options.today.unwrap_or_else(reference_date);
    let mut session =
        InventorySession::from_frame(&loaded.config, &loaded.frame, &loaded.mapping, today);
    session
        .apply_edits(&edits)
        .context("apply record edits")?;

    let tables = ReportTables::from_session(&session).context("build report tables")?;
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(input));
    let outputs = if options.dry_run {
        info!(output_dir = %output_dir.display(), "dry run, exports not written");
        Vec::new()
    } else {
        tables
            .write_all(&output_dir)
            .with_context(|| format!("write exports to {}", output_dir.display()))?
    };

    let result = ReportResult {
        input: input.clone(),
        today,
        records: session.len(),
        edits_applied: edits.len(),
        inventory: session.records().to_vec(),
        summary: session.summary(),
        status_counts: session.status_counts(),
        matrix: session.matrix(),
        output_dir,
        outputs,
        dry_run: options.dry_run,
    };
    info!(
        records = result.records,
        report_types = result.matrix.len(),
        duration_ms = start.elapsed().as_millis(),
        "report complete"
    );
    Ok(result)
}

/// Reports the detected column mapping without normalizing anything.
pub fn run_columns(options: &InputOptions) -> Result<ColumnsResult> {
    let span = info_span!("columns", input = %options.input.display());
    let _guard = span.enter();
    let loaded = load_input(options)?;
    Ok(ColumnsResult {
        input: options.input.clone(),
        missing_fields: loaded.mapping.missing_fields(),
        unmapped_columns: loaded.mapping.unmapped_columns(&loaded.columns),
        columns: loaded.columns,
        mapping: loaded.mapping,
    })
}

/// Builds the matrix and checks it and the group maps against the data.
pub fn run_check(options: &InputOptions, today: Option<NaiveDate>) -> Result<CheckResult> {
    let span = info_span!("check", input = %options.input.display());
    let _guard = span.enter();
    let loaded = load_input(options)?;
    let today = today.unwrap_or_else(reference_date);
    let session =
        InventorySession::from_frame(&loaded.config, &loaded.frame, &loaded.mapping, today);
    let matrix = session.matrix();
    let report = session.diagnostics(&matrix);
    Ok(CheckResult {
        input: options.input.clone(),
        today,
        records: session.len(),
        matrix,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_defaults_beside_input() {
        assert_eq!(
            default_output_dir(Path::new("/data/stock.csv")),
            PathBuf::from("/data/output")
        );
        assert_eq!(
            default_output_dir(Path::new("stock.csv")),
            PathBuf::from("output")
        );
    }

    #[test]
    fn one_bad_edit_rejects_the_batch() {
        let edits = vec!["1:quantity=4".to_string(), "2:colour=red".to_string()];
        let error = parse_edits(&edits).unwrap_err();
        assert!(error.to_string().contains("2:colour=red"));
        assert_eq!(parse_edits(&edits[..1]).unwrap().len(), 1);
    }
}

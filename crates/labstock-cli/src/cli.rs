//! CLI argument definitions for the inventory reporter.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use labstock_cli::pipeline::InputOptions;
use labstock_model::parse_iso_date;

#[derive(Parser)]
#[command(
    name = "labstock",
    version,
    about = "Lab inventory expiry status - classify stock and build status matrices",
    long_about = "Classify lab inventory records by expiry date and aggregate them into a\n\
                  per-test status matrix of reagents, calibrators and QC material.\n\n\
                  Calibrator and QC stock shared between tests is resolved through the\n\
                  group maps of the configuration file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify an inventory, print the status matrix and write exports.
    Report(ReportArgs),

    /// Show which source columns map onto the canonical fields.
    Columns(ColumnsArgs),

    /// Check group maps and matrix coverage against the data.
    Check(CheckArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Inventory CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Configuration file (default: $LABSTOCK_CONFIG, then built-in).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Force a column mapping, e.g. `--map quantity="On Hand"`.
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub mappings: Vec<String>,
}

impl InputArgs {
    pub fn options(&self) -> InputOptions {
        InputOptions {
            input: self.input.clone(),
            config: self.config.clone(),
            mappings: self.mappings.clone(),
        }
    }
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Edit a record before reporting, e.g. `--edit 3:quantity=12`.
    ///
    /// Rows are 1-based in display order (platform, type, item). Fields are
    /// `quantity` and `expiry_date`; an empty expiry value clears the date.
    #[arg(long = "edit", value_name = "ROW:FIELD=VALUE")]
    pub edits: Vec<String>,

    /// Reference date for classification (default: today).
    #[arg(long = "today", value_name = "YYYY-MM-DD", value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Output directory for exports (default: <INPUT dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Build and print the report without writing exports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// List every record with the row number `--edit` expects.
    #[arg(long = "records")]
    pub records: bool,

    /// Print the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Reference date for classification (default: today).
    #[arg(long = "today", value_name = "YYYY-MM-DD", value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Print the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|error| error.to_string())
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "labstock",
            "report",
            "stock.csv",
            "--map",
            "quantity=On Hand",
            "--edit",
            "2:quantity=4",
            "--edit",
            "3:expiry_date=",
            "--today",
            "2024-06-01",
            "--dry-run",
            "--records",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.input.mappings, ["quantity=On Hand"]);
        assert_eq!(args.edits, ["2:quantity=4", "3:expiry_date="]);
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(args.dry_run);
        assert!(args.records);
        assert!(!args.json);
    }

    #[test]
    fn malformed_today_is_rejected() {
        let result = Cli::try_parse_from(["labstock", "check", "stock.csv", "--today", "June"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "labstock",
            "columns",
            "stock.csv",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
    }
}

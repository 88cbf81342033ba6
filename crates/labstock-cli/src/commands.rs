use anyhow::{Context, Result};
use serde::Serialize;

use labstock_cli::pipeline::{ReportOptions, run_check, run_columns, run_report};

use crate::cli::{CheckArgs, ColumnsArgs, ReportArgs};
use crate::summary::{print_check, print_columns, print_report};

/// Runs `labstock report`. Returns the process exit code.
pub fn report(args: &ReportArgs) -> Result<i32> {
    let options = ReportOptions {
        input: args.input.options(),
        edits: args.edits.clone(),
        today: args.today,
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    let result = run_report(&options)?;
    if args.json {
        print_json(&result)?;
    } else {
        print_report(&result, args.records);
    }
    Ok(0)
}

pub fn columns(args: &ColumnsArgs) -> Result<i32> {
    let result = run_columns(&args.input.options())?;
    if args.json {
        print_json(&result)?;
    } else {
        print_columns(&result);
    }
    Ok(0)
}

/// Runs `labstock check`. Exits 1 when the check finds gaps or unused keys.
pub fn check(args: &CheckArgs) -> Result<i32> {
    let result = run_check(&args.input.options(), args.today)?;
    if args.json {
        print_json(&result)?;
    } else {
        print_check(&result);
    }
    Ok(if result.passed() { 0 } else { 1 })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{text}");
    Ok(())
}

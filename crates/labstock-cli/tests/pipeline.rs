//! Integration tests for the command pipelines.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use labstock_cli::pipeline::{InputOptions, ReportOptions, run_check, run_columns, run_report};
use labstock_map::MatchKind;
use labstock_model::{CanonicalField, CellStatus};
use tempfile::TempDir;

const INVENTORY: &str = "\
Site,Category,Item Description,Catalog Number,On Hand,Expiration Date,Notes
Alinity,Glucose,Glucose Reagent,08P20,12,2025-06-30,
Alinity,Glucose,Glucose Calibrator,08P22,2,2025-09-01,
Alinity,Glucose,Glucose QC,08P23,4,2025-05-01,shelf 2
Alinity,TSH,TSH Reagent,7K62,6,2026-01-01,
Alinity,Maintenance,Wash Buffer,W1,9,2025-06-02,
";

fn today() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2025, 6, 1)
}

fn write_inventory(dir: &Path) -> PathBuf {
    let path = dir.join("stock.csv");
    std::fs::write(&path, INVENTORY).unwrap();
    path
}

fn input(path: PathBuf) -> InputOptions {
    InputOptions {
        input: path,
        config: None,
        mappings: vec!["quantity=On Hand".to_string()],
    }
}

#[test]
fn columns_report_detection_and_overrides() {
    let dir = TempDir::new().unwrap();
    let result = run_columns(&input(write_inventory(dir.path()))).unwrap();

    let platform = result.mapping.entry(CanonicalField::Platform).unwrap();
    assert_eq!(platform.column, "Site");
    assert_eq!(platform.kind, MatchKind::Exact);
    let quantity = result.mapping.entry(CanonicalField::Quantity).unwrap();
    assert_eq!(quantity.kind, MatchKind::Override);
    assert!(result.missing_fields.is_empty());
    assert_eq!(result.unmapped_columns, ["Notes"]);

    insta::assert_json_snapshot!(result.mapping, @r#"
    {
      "entries": {
        "platform": {
          "column": "Site",
          "kind": "exact"
        },
        "type": {
          "column": "Category",
          "kind": "exact"
        },
        "item": {
          "column": "Item Description",
          "kind": "substring"
        },
        "cat_no": {
          "column": "Catalog Number",
          "kind": "substring"
        },
        "quantity": {
          "column": "On Hand",
          "kind": "override"
        },
        "expiry_date": {
          "column": "Expiration Date",
          "kind": "substring"
        }
      }
    }
    "#);
}

#[test]
fn report_writes_exports_beside_input() {
    let dir = TempDir::new().unwrap();
    let options = ReportOptions {
        input: input(write_inventory(dir.path())),
        edits: vec!["4:quantity=1".to_string()],
        today: today(),
        output_dir: None,
        dry_run: false,
    };
    let result = run_report(&options).unwrap();

    assert_eq!(result.records, 5);
    assert_eq!(result.edits_applied, 1);
    assert_eq!(result.output_dir, dir.path().join("output"));
    assert_eq!(result.outputs.len(), 4);
    assert!(result.outputs.iter().all(|path| path.exists()));

    // Maintenance is excluded from the matrix.
    let types: Vec<&str> = result
        .matrix
        .rows
        .iter()
        .map(|row| row.test_type.as_str())
        .collect();
    assert_eq!(types, ["Glucose", "TSH"]);
    let glucose = result.matrix.row("Glucose").unwrap();
    assert_eq!(glucose.reagent.status, CellStatus::ExpiringSoon);
    assert_eq!(glucose.qc.status, CellStatus::Expired);

    // Row 4 in display order is the Maintenance wash buffer.
    let edited = &result.inventory[3];
    assert_eq!(edited.item.as_deref(), Some("Wash Buffer"));
    assert_eq!(edited.quantity, 1);
    assert_eq!(result.inventory.len(), result.records);
    assert_eq!(result.summary.total_quantity, 12 + 2 + 4 + 6 + 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let options = ReportOptions {
        input: input(write_inventory(dir.path())),
        today: today(),
        output_dir: Some(dir.path().join("exports")),
        dry_run: true,
        ..ReportOptions::default()
    };
    let result = run_report(&options).unwrap();
    assert!(result.outputs.is_empty());
    assert!(!dir.path().join("exports").exists());
}

#[test]
fn out_of_range_edit_fails_the_report() {
    let dir = TempDir::new().unwrap();
    let options = ReportOptions {
        input: input(write_inventory(dir.path())),
        edits: vec!["9:quantity=1".to_string()],
        today: today(),
        dry_run: true,
        ..ReportOptions::default()
    };
    let error = run_report(&options).unwrap_err();
    assert!(format!("{error:#}").contains("apply record edits"));
}

#[test]
fn check_flags_missing_cells() {
    let dir = TempDir::new().unwrap();
    let result = run_check(&input(write_inventory(dir.path())), today()).unwrap();
    assert!(!result.passed());
    let tsh_gaps: Vec<_> = result
        .report
        .gaps
        .iter()
        .filter(|gap| gap.test_type == "TSH")
        .collect();
    assert!(!tsh_gaps.is_empty());
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let options = input(dir.path().join("absent.csv"));
    assert!(run_columns(&options).is_err());
}

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use labstock_cli::types::{CheckResult, ColumnsResult, ReportResult};
use labstock_core::{CellGap, GapReason};
use labstock_map::MatchKind;
use labstock_model::{
    AggregateCell, CanonicalField, CellStatus, Component, ExpiryStatus, InventoryRecord,
    StatusMatrix,
};

pub fn print_report(result: &ReportResult, show_records: bool) {
    println!("Input: {}", result.input.display());
    println!("Reference date: {}", result.today);
    if result.edits_applied > 0 {
        println!("Edits applied: {}", result.edits_applied);
    }
    println!("{}", metrics_table(result));
    println!();
    println!("Status matrix:");
    println!("{}", matrix_table(&result.matrix));
    let numbered = result.inventory.iter().enumerate().map(|(idx, record)| (idx + 1, record));
    if show_records {
        println!();
        println!("Inventory:");
        println!("{}", records_table(numbered));
    } else {
        let expiring: Vec<_> = numbered
            .filter(|(_, record)| record.status == ExpiryStatus::ExpiringSoon)
            .collect();
        if !expiring.is_empty() {
            println!();
            println!("Expiring soon:");
            println!("{}", records_table(expiring));
        }
    }
    if result.dry_run {
        println!("Dry run: exports not written to {}", result.output_dir.display());
    } else {
        println!("Output: {}", result.output_dir.display());
        for path in &result.outputs {
            println!("- {}", path.display());
        }
    }
}

pub fn print_columns(result: &ColumnsResult) {
    println!("Input: {}", result.input.display());
    println!("{}", columns_table(result));
    if !result.unmapped_columns.is_empty() {
        println!("Unmapped source columns: {}", result.unmapped_columns.join(", "));
    }
}

pub fn print_check(result: &CheckResult) {
    println!("Input: {}", result.input.display());
    println!("Reference date: {}", result.today);
    let report = &result.report;
    println!(
        "{} records, {} types, {} report types",
        result.records, report.data_types, report.report_types
    );
    if report.gaps.is_empty() {
        println!("Every report type has reagent, calibrator and QC stock.");
    } else {
        println!();
        println!("Missing cells:");
        println!("{}", gap_table(&report.gaps));
    }
    if !report.unused_keys.is_empty() {
        println!();
        println!("Group map keys not found in data:");
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Map"),
            header_cell("Key"),
            header_cell("Pooled type"),
        ]);
        apply_table_style(&mut table);
        for key in &report.unused_keys {
            table.add_row(vec![
                Cell::new(key.component),
                Cell::new(&key.key).fg(Color::Yellow),
                Cell::new(&key.pooled),
            ]);
        }
        println!("{table}");
    }
    if !report.absent_pooled_types.is_empty() {
        println!(
            "Pooled types not found in data: {}",
            report.absent_pooled_types.join(", ")
        );
    }
    if !report.near_misses.is_empty() {
        println!();
        println!("Possible spelling mismatches:");
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Map"),
            header_cell("Configured"),
            header_cell("Closest type"),
            header_cell("Similarity"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        for miss in &report.near_misses {
            table.add_row(vec![
                Cell::new(miss.component),
                Cell::new(&miss.configured),
                Cell::new(&miss.data_type).fg(Color::Green),
                Cell::new(format!("{:.2}", miss.similarity)),
            ]);
        }
        println!("{table}");
    }
    if result.passed() {
        println!("Check passed.");
    } else {
        eprintln!("Check failed.");
    }
}

fn metrics_table(result: &ReportResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let summary = &result.summary;
    table.add_row(vec![Cell::new("Records"), Cell::new(result.records)]);
    table.add_row(vec![Cell::new("Distinct items"), Cell::new(summary.distinct_items)]);
    table.add_row(vec![Cell::new("Total quantity"), Cell::new(summary.total_quantity)]);
    table.add_row(vec![
        Cell::new("Expired"),
        count_cell(summary.expired, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Expiring soon"),
        count_cell(summary.expiring_soon, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("OK"),
        count_cell(result.status_counts.ok, Color::Green),
    ]);
    table
}

pub fn matrix_table(matrix: &StatusMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Type")];
    header.extend(
        Component::MATRIX
            .iter()
            .map(|component| header_cell(component.label())),
    );
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for row in &matrix.rows {
        let mut cells = vec![
            Cell::new(&row.test_type)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        cells.extend(
            Component::MATRIX
                .iter()
                .map(|component| status_cell(row.cell(*component).copied().unwrap_or_default())),
        );
        table.add_row(cells);
    }
    table
}

/// Records with their 1-based display row, the number `--edit` takes.
fn records_table<'r>(rows: impl IntoIterator<Item = (usize, &'r InventoryRecord)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Platform"),
        header_cell("Type"),
        header_cell("Item"),
        header_cell("Cat No"),
        header_cell("Qty"),
        header_cell("Expiry"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for (row, record) in rows {
        table.add_row(vec![
            dim_cell(row),
            text_cell(record.platform.as_deref()),
            text_cell(record.test_type.as_deref()),
            text_cell(record.item.as_deref()),
            text_cell(record.cat_no.as_deref()),
            Cell::new(record.quantity),
            record.expiry_date.map_or_else(|| dim_cell("-"), Cell::new),
            expiry_cell(record.status),
        ]);
    }
    table
}

fn columns_table(result: &ColumnsResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Source column"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for field in CanonicalField::ALL {
        let row = match result.mapping.entry(field) {
            Some(entry) if result.columns.contains(&entry.column) => vec![
                Cell::new(field),
                Cell::new(&entry.column),
                match_cell(entry.kind),
            ],
            Some(entry) => vec![
                Cell::new(field),
                Cell::new(&entry.column).fg(Color::Red),
                Cell::new("not in file").fg(Color::Red),
            ],
            None => vec![Cell::new(field), dim_cell("-"), dim_cell("missing")],
        };
        table.add_row(row);
    }
    table
}

fn gap_table(gaps: &[CellGap]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Component"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    for gap in gaps {
        let reason = match &gap.reason {
            GapReason::NoDirectRecords => "no records of this type".to_string(),
            GapReason::Unmapped => "no records and no group map entry".to_string(),
            GapReason::PooledTypeAbsent { pooled } => format!("pooled type `{pooled}` not in data"),
            GapReason::PooledTypeEmpty { pooled } => {
                format!("pooled type `{pooled}` has no {} records", gap.component)
            }
        };
        table.add_row(vec![
            Cell::new(&gap.test_type),
            Cell::new(gap.component),
            Cell::new(reason),
        ]);
    }
    table
}

fn status_cell(cell: AggregateCell) -> Cell {
    let text = format!("{} ({})", cell.status, cell.quantity);
    match cell.status {
        CellStatus::Expired => Cell::new(text)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        CellStatus::ExpiringSoon => Cell::new(text).fg(Color::Yellow),
        CellStatus::Ok => Cell::new(text).fg(Color::Green),
        CellStatus::Missing => dim_cell(cell.status),
    }
}

fn expiry_cell(status: ExpiryStatus) -> Cell {
    match status {
        ExpiryStatus::Expired => Cell::new(status)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        ExpiryStatus::ExpiringSoon => Cell::new(status).fg(Color::Yellow),
        ExpiryStatus::Ok => Cell::new(status).fg(Color::Green),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn match_cell(kind: MatchKind) -> Cell {
    match kind {
        MatchKind::Exact => Cell::new("exact").fg(Color::Green),
        MatchKind::Substring => Cell::new("substring").fg(Color::Yellow),
        MatchKind::Override => Cell::new("override")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

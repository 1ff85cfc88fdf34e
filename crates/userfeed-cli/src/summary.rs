use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::RunResult;

/// Print the run summary on stderr; stdout carries the accepted records.
pub fn print_summary(result: &RunResult) {
    eprintln!("Source: {}", result.source.display());
    if let Some(path) = &result.rejections {
        eprintln!("Rejections: {}", path.display());
    }
    if let Some(path) = &result.report {
        eprintln!("Run report: {}", path.display());
    }
    eprintln!("{}", totals_table(result));
    if !result.reasons.is_empty() {
        eprintln!();
        eprintln!("Rejection reasons:");
        eprintln!("{}", reason_table(result));
    }
}

fn totals_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Accepted"),
        header_cell("Rejected"),
        header_cell("Rejection rows"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.record_count).add_attribute(Attribute::Bold),
        count_cell(result.accepted_count, Color::Green),
        count_cell(result.rejected_count, Color::Red),
        count_cell(result.rejection_rows, Color::Yellow),
    ]);
    table
}

fn reason_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Reason"),
        header_cell("Records"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for reason in &result.reasons {
        table.add_row(vec![
            field_cell(reason.violation.field().name()),
            Cell::new(reason.violation.label()),
            count_cell(reason.records, Color::Red),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn field_cell(name: &str) -> Cell {
    Cell::new(name).fg(Color::Blue)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

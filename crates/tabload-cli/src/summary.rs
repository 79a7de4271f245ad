//! Run summary printed after the pipeline finishes.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::pipeline::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    println!("Table: {}", summary.table);
    println!(
        "Input: {} file(s), {} rows, {} columns",
        summary.files.len(),
        summary.rows,
        summary.columns
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("SQL Type"),
        header_cell("Max Chars"),
        header_cell("Notes"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for spec in &summary.schema.columns {
        let width = summary.widths.get(&spec.name);
        let max_chars = width.map_or(String::new(), |w| w.max_chars.to_string());
        let notes = column_notes(summary, &spec.name);
        table.add_row(vec![
            Cell::new(&spec.name),
            Cell::new(spec.sql_type.to_string()),
            Cell::new(max_chars),
            Cell::new(notes),
        ]);
    }

    println!("{table}");

    let converted = summary.dates.iter().filter(|d| d.converted).count();
    if converted > 0 {
        println!("Date columns converted: {converted}");
    }
    if !summary.renames.is_empty() {
        println!("Columns renamed: {}", summary.renames.len());
    }

    match summary.rows_loaded {
        Some(rows) => {
            let load = summary
                .timings
                .load
                .map_or(String::new(), |d| format!(" in {:.1}s", d.as_secs_f64()));
            println!("Loaded {rows} row(s){load}");
        }
        None => println!("Dry run: no rows loaded"),
    }
    println!(
        "Timing: ingest {:.1}s, clean {:.1}s",
        summary.timings.ingest.as_secs_f64(),
        summary.timings.clean.as_secs_f64()
    );
}

fn column_notes(summary: &RunSummary, name: &str) -> String {
    let mut notes = Vec::new();

    if let Some(rename) = summary.renames.iter().find(|r| r.to == name) {
        notes.push(format!("renamed from '{}'", rename.from));
    }
    if let Some(conversion) = summary.dates.iter().find(|d| d.column == name) {
        if conversion.converted {
            notes.push(format!(
                "dates parsed {}/{}",
                conversion.parsed, conversion.total
            ));
        } else {
            notes.push("date candidate, nothing parsed".to_string());
        }
    }
    if summary.widths.get(name).is_some_and(|w| w.oversize) {
        notes.push("oversize, stored as TEXT".to_string());
    }

    notes.join("; ")
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

//! Summary tables using tabled

use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Modify, Style, object::Columns, object::Rows},
};

use crate::import::{CollectionResult, ImportReport};

const HEADER: [&str; 6] = ["collection", "total", "imported", "skipped", "errors", "status"];

/// Per-collection table of an import report.
pub fn import_summary_table(report: &ImportReport, use_colors: bool) -> String {
    if report.collections.is_empty() {
        return "(no collections)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(HEADER);

    for (name, result) in &report.collections {
        let row: Vec<String> = match result {
            CollectionResult::Imported(outcome) => vec![
                name.clone(),
                outcome.total_documents.to_string(),
                outcome.imported.to_string(),
                outcome.skipped.to_string(),
                outcome.errors.to_string(),
                if outcome.errors == 0 { "ok" } else { "partial" }.to_string(),
            ],
            CollectionResult::Failed(_) => vec![
                name.clone(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "failed".to_string(),
            ],
        };
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.with(Modify::new(Columns::new(1..=4)).with(Alignment::right()));
    table.with(Modify::new(Rows::first()).with(Alignment::center()));
    if use_colors {
        table.modify(Rows::first(), Color::FG_CYAN | Color::BOLD);
    }
    table.to_string()
}

//! Table formatting utilities for CLI output.

use batchx::Program;
use comfy_table::{presets, ContentArrangement, Table};

/// One row of a batch preview.
pub struct PreviewRow {
    pub file: String,
    /// One-based step number; `None` for a failed file.
    pub step: Option<usize>,
    pub executable: String,
    /// The step's arguments, or `ERROR: message` for a failed file.
    pub arguments: String,
}

/// Format preview rows as an ASCII table.
pub fn format_preview_table(rows: &[PreviewRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Step", "Program", "Arguments"]);

    for row in rows {
        table.add_row(vec![
            row.file.clone(),
            row.step.map_or_else(|| "-".to_string(), |s| s.to_string()),
            row.executable.clone(),
            row.arguments.clone(),
        ]);
    }

    table
}

/// Format the stored programs as an ASCII table.
pub fn format_programs_table(programs: &[Program]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Executable", "Arguments", "Runnable"]);

    for program in programs {
        table.add_row(vec![
            program.name.clone(),
            program.executable.clone(),
            program.arguments.clone(),
            if program.is_runnable() { "yes" } else { "no" }.to_string(),
        ]);
    }

    table
}

//! Table rendering for validation reports.
//!
//! Terminal-width-aware output with comfy-table and colored status symbols.

use crate::outcome::CheckOutcome;
use crate::report::ValidationReport;
use crate::Severity;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Create a table pre-configured for terminal-width-aware output.
///
/// Uses crossterm to detect the terminal width, falling back to 120
/// columns when not connected to a TTY.
pub fn new_table() -> Table {
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(120);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(width);
    table
}

/// Build the outcome table for a report.
///
/// Rows keep the order the checks ran in. Status symbols follow the
/// report mode, so a warning shows as an error under strict mode.
pub fn report_table(report: &ValidationReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Status", "Category", "Result"]);

    for outcome in report.outcomes() {
        table.add_row(vec![
            status_cell(report, outcome),
            Cell::new(outcome.category.label()),
            Cell::new(&outcome.message),
        ]);
    }

    table
}

/// Render the table followed by the summary line
pub fn render_table(report: &ValidationReport) -> String {
    format!(
        "Validating skill: {}\n{}\n{}\n",
        report.skill(),
        report_table(report),
        report.summary()
    )
}

/// Print the report as a table to stdout
pub fn print_report_table(report: &ValidationReport) {
    print!("{}", render_table(report));
}

fn status_cell(report: &ValidationReport, outcome: &CheckOutcome) -> Cell {
    if outcome.passed {
        return Cell::new("\u{2713}").fg(Color::Green); // check
    }
    match report.mode().effective_severity(outcome) {
        Severity::Error => Cell::new("\u{2717}").fg(Color::Red), // cross
        _ => Cell::new("\u{26A0}").fg(Color::Yellow),           // warning
    }
}

//! Table rendering for CLI list commands

use tabled::builder::Builder;
use tabled::settings::Style;

/// Render a header row plus data rows as a rounded-border table
pub fn render(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

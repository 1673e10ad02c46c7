//! Plain-text views of the application state.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};

use crate::state::AppState;

/// Rows shown in the item table.
pub const TABLE_ROWS: usize = 50;

pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

pub fn status(state: &AppState) -> String {
    let headline = if state.loading {
        "Working...".to_string()
    } else {
        state.status.title.clone()
    };
    let http = state
        .last_result
        .as_ref()
        .map(|result| format!(" (HTTP {})", result.http_status))
        .unwrap_or_default();
    format!(
        "[{}] {headline}\n{}\nLast action: {}{http}",
        state.status.kind,
        state.status.message,
        format_time(state.last_action_at)
    )
}

pub fn checklist(state: &AppState) -> String {
    state
        .readiness()
        .checks()
        .iter()
        .map(|(label, ok)| format!("{} {label}", if *ok { "OK " } else { "..." }))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn metrics(state: &AppState) -> String {
    format!(
        "Items in table: {}\nTotal in source: {}\nSelected file: {}",
        state.catalog.items().len(),
        state
            .catalog
            .total()
            .map_or_else(|| "-".to_string(), |total| total.to_string()),
        state.source().unwrap_or("-")
    )
}

pub fn files(state: &AppState) -> String {
    let files = state.directory.files();
    if files.is_empty() {
        return "No files".to_string();
    }
    files
        .iter()
        .map(|file| {
            let marker = if state.source() == Some(file.file_name.as_str()) {
                '*'
            } else {
                ' '
            };
            format!("{marker} {} ({})", file.file_name, file.item_count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn item_table(state: &AppState) -> String {
    let filtered = state.catalog.filtered();
    let query = state.catalog.query().trim();
    if filtered.is_empty() {
        return if state.catalog.items().is_empty() {
            "No items loaded yet.".to_string()
        } else {
            format!("No matches for '{query}'.")
        };
    }
    let mut out = String::new();
    if !query.is_empty() {
        let _ = writeln!(
            out,
            "Filter: '{query}' ({} of {})",
            filtered.len(),
            state.catalog.items().len()
        );
    }
    out.push_str("Sel  ID            Title");
    for item in filtered.iter().take(TABLE_ROWS) {
        let mark = if state.catalog.is_selected(&item.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = write!(out, "\n{mark}  {:<12}  {}", item.id, item.title());
    }
    if filtered.len() > TABLE_ROWS {
        let _ = write!(out, "\n... {} more", filtered.len() - TABLE_ROWS);
    }
    out
}

pub fn selection_card(state: &AppState) -> String {
    let first = state.catalog.first_selected_item();
    format!(
        "Selected count: {}\nitemNumber: {}\nFirst selected title: {}",
        state.catalog.selection().len(),
        first.map_or_else(|| "-".to_string(), |item| item.item_number()),
        first.map_or_else(|| "-".to_string(), |item| item.title()),
    )
}

pub fn details(state: &AppState) -> String {
    if state.transcript.is_empty() {
        "-".to_string()
    } else {
        state.transcript.clone()
    }
}

pub fn overview(state: &AppState) -> String {
    [
        status(state),
        checklist(state),
        metrics(state),
        files(state),
        item_table(state),
        selection_card(state),
    ]
    .join("\n\n")
}

//! Synchronous state transitions. No I/O happens here.

use client_core::{OperationOutcome, OperationStatus};
use serde_json::Value;
use shared::protocol::{BulkUploadEntry, FilesResponse, ItemsPage};
use tracing::{debug, info};

use super::{commands::Command, events::ConsoleEvent};
use crate::state::{reconcile, AppState};

pub fn reduce(state: &mut AppState, event: ConsoleEvent) {
    match event {
        ConsoleEvent::BaseUrlChanged(base_url) => {
            debug!(%base_url, "api base changed");
            state.set_base_url(base_url);
        }
        ConsoleEvent::SourceSelected(file_name) => {
            if let Err(error) = state.directory.select(&file_name) {
                state.status = OperationStatus::error("Source file", error.to_string());
            }
        }
        ConsoleEvent::QueryChanged(query) => state.catalog.set_query(query),
        ConsoleEvent::SelectionToggled(id) => {
            if let Err(error) = state.catalog.toggle(&id) {
                state.status = OperationStatus::error("Item selection", error.to_string());
            }
        }
        ConsoleEvent::Rejected { title, error } => {
            info!(%title, %error, "operation rejected locally");
            state.status = OperationStatus::error(title, error.to_string());
        }
        ConsoleEvent::OperationStarted { label } => {
            state.loading = true;
            state.transcript.clear();
            state.status = OperationStatus::loading(label);
        }
        ConsoleEvent::OperationFinished { command, outcome } => {
            finish(state, &command, outcome);
        }
    }
}

fn finish(state: &mut AppState, command: &Command, outcome: OperationOutcome) {
    let OperationOutcome {
        result,
        transcript,
        status,
        finished_at,
    } = outcome;
    state.loading = false;
    state.transcript = transcript;
    state.last_action_at = Some(finished_at);
    state.status = status;

    let null = Value::Null;
    let body = result.json().unwrap_or(&null);
    match command {
        Command::CheckConnection => state.connection_ok = result.ok,
        Command::LoadFiles if result.ok => {
            let listing = FilesResponse::from_body(body);
            let count = listing.files.len();
            state.directory.apply_listing(listing.files);
            state.status.message = format!("Files available: {count}");
        }
        Command::LoadFiles => state.directory.clear(),
        Command::LoadItems if result.ok => {
            let page = ItemsPage::from_body(body);
            let count = page.items.len();
            state.catalog.replace(page);
            state.status.message = format!("Loaded {count} items");
        }
        Command::LoadItems => state.catalog.clear(),
        Command::UploadSelected { .. } if result.ok => {
            if let Some(entries) = BulkUploadEntry::parse_all(body) {
                let removed = reconcile(&mut state.catalog, &entries);
                info!(removed, "uploaded items removed from catalog");
            }
        }
        _ => {}
    }
    state.last_result = Some(result);
}

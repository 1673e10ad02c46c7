//! Application state owned by the controller and mutated only by the reducer.

pub mod catalog;
pub mod directory;
pub mod readiness;
pub mod reconcile;

use chrono::{DateTime, Utc};
use client_core::{Endpoints, OperationResult, OperationStatus};

pub use catalog::Catalog;
pub use directory::Directory;
pub use readiness::Readiness;
pub use reconcile::reconcile;

#[derive(Debug, Clone)]
pub struct AppState {
    pub base_url: String,
    pub endpoints: Endpoints,
    /// Page size requested when loading items.
    pub item_limit: u32,
    pub directory: Directory,
    pub catalog: Catalog,
    pub status: OperationStatus,
    pub loading: bool,
    pub transcript: String,
    pub last_result: Option<OperationResult>,
    pub last_action_at: Option<DateTime<Utc>>,
    pub connection_ok: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>, item_limit: u32) -> Self {
        let base_url = base_url.into();
        Self {
            endpoints: Endpoints::resolve(&base_url),
            base_url,
            item_limit,
            directory: Directory::default(),
            catalog: Catalog::default(),
            status: OperationStatus::idle(),
            loading: false,
            transcript: String::new(),
            last_result: None,
            last_action_at: None,
            connection_ok: false,
        }
    }

    /// A verified connection belongs to the old base, so it is reset.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
        self.endpoints = Endpoints::resolve(&self.base_url);
        self.connection_ok = false;
    }

    pub fn source(&self) -> Option<&str> {
        self.directory.selected()
    }

    pub fn readiness(&self) -> Readiness {
        Readiness {
            connection_verified: self.connection_ok,
            files_loaded: !self.directory.files().is_empty(),
            items_loaded: !self.catalog.items().is_empty(),
            items_selected: !self.catalog.selection().is_empty(),
        }
    }
}

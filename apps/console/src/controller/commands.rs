//! Network side effects described as data.

use client_core::OperationRequest;
use shared::{
    domain::ItemId,
    protocol::{DeleteByItemNumberRequest, UploadSelectedRequest},
};

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckConnection,
    LoadFiles,
    LoadItems,
    ValidateItem { id: ItemId },
    UploadSelected { item_ids: Vec<ItemId> },
    UploadSourceFile { source: String },
    UploadAllFiles,
    ListFailed,
    DeleteByItemNumber { item_numbers: Vec<String> },
}

impl Command {
    pub fn label(&self) -> String {
        match self {
            Self::CheckConnection => "Connection check".to_string(),
            Self::LoadFiles => "Load JSON files".to_string(),
            Self::LoadItems => "Load items".to_string(),
            Self::ValidateItem { id } => format!("Validate item #{id}"),
            Self::UploadSelected { item_ids } => format!("Upload selected ({})", item_ids.len()),
            Self::UploadSourceFile { source } => {
                format!("Upload all from selected file ({source})")
            }
            Self::UploadAllFiles => "Upload all from JSON folder".to_string(),
            Self::ListFailed => "Failed items list".to_string(),
            Self::DeleteByItemNumber { item_numbers } => {
                format!("Delete ({})", item_numbers.len())
            }
        }
    }

    /// Destructive commands need an explicit operator yes.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            Self::UploadSelected { item_ids } => {
                Some(format!("Upload {} selected item(s)?", item_ids.len()))
            }
            Self::UploadSourceFile { source } => {
                Some(format!("Upload all items from selected file: {source}?"))
            }
            Self::UploadAllFiles => {
                Some("Upload all items from JSON folder (all files)?".to_string())
            }
            Self::DeleteByItemNumber { item_numbers } => Some(format!(
                "Delete {} item(s) by itemNumber?",
                item_numbers.len()
            )),
            _ => None,
        }
    }

    pub fn request(&self, state: &AppState) -> serde_json::Result<OperationRequest> {
        let endpoints = &state.endpoints;
        let source = state.source();
        let label = self.label();
        let request = match self {
            Self::CheckConnection => OperationRequest::get(&endpoints.docs, label),
            Self::LoadFiles => OperationRequest::get(&endpoints.files, label),
            Self::LoadItems => {
                OperationRequest::get(endpoints.items_url(state.item_limit, source), label)
            }
            Self::ValidateItem { id } => {
                OperationRequest::post(endpoints.validate_one_url(id.as_str(), source), label)
            }
            Self::UploadSelected { item_ids } => {
                let body = UploadSelectedRequest {
                    item_ids: item_ids.iter().map(ToString::to_string).collect(),
                };
                OperationRequest::post(endpoints.upload_selected_url(source), label)
                    .with_payload(serde_json::to_value(body)?)
            }
            Self::UploadSourceFile { source } => {
                OperationRequest::post(endpoints.upload_all_url(Some(source)), label)
            }
            Self::UploadAllFiles => OperationRequest::post(endpoints.upload_all_url(None), label),
            Self::ListFailed => OperationRequest::get(&endpoints.status, label),
            Self::DeleteByItemNumber { item_numbers } => {
                let body = DeleteByItemNumberRequest {
                    item_numbers: item_numbers.clone(),
                };
                OperationRequest::post(&endpoints.delete_by_item_number, label)
                    .with_payload(serde_json::to_value(body)?)
            }
        };
        Ok(request)
    }
}

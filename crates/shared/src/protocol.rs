use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Item, ItemId, SourceFile};

/// `GET /items/json/files`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<SourceFile>,
}

impl FilesResponse {
    /// A body without a `files` array is an empty listing. Malformed
    /// entries are skipped.
    pub fn from_body(body: &Value) -> Self {
        let files = body
            .get("files")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| SourceFile::deserialize(entry).ok())
                    .collect()
            })
            .unwrap_or_default();
        Self { files }
    }
}

/// `GET /items/json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsPage {
    pub items: Vec<Item>,
    pub total: Option<u64>,
}

impl ItemsPage {
    pub fn from_body(body: &Value) -> Self {
        let mut seen = HashSet::new();
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .cloned()
                    .filter_map(Item::from_value)
                    .filter(|item| seen.insert(item.id.clone()))
                    .collect()
            })
            .unwrap_or_default();
        let total = body.get("total").and_then(Value::as_u64);
        Self { items, total }
    }
}

/// `POST /items/upload_one`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSelectedRequest {
    pub item_ids: Vec<String>,
}

/// `POST /items/delete/by-item-number`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteByItemNumberRequest {
    pub item_numbers: Vec<String>,
}

/// One per-item outcome of a bulk upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUploadEntry {
    pub success: bool,
    pub item_id_local: Option<ItemId>,
}

impl BulkUploadEntry {
    pub fn from_value(value: &Value) -> Self {
        let success = matches!(value.get("success"), Some(Value::Bool(true)));
        let item_id_local = value
            .get("item_id_local")
            .and_then(ItemId::coerce)
            .map(|id| id.as_str().trim().to_string())
            .filter(|id| !id.is_empty())
            .map(ItemId);
        Self {
            success,
            item_id_local,
        }
    }

    /// `None` unless the body is a sequence.
    pub fn parse_all(body: &Value) -> Option<Vec<Self>> {
        body.as_array()
            .map(|entries| entries.iter().map(Self::from_value).collect())
    }
}

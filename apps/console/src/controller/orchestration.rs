//! Turns operator intent into a command, rejecting bad input before any
//! request is built.

use std::collections::HashSet;

use shared::error::InputError;

use super::commands::Command;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CheckConnection,
    LoadFiles,
    LoadItems,
    ValidateFirstSelected,
    UploadSelected,
    UploadSourceFile,
    UploadAllFiles,
    ListFailed,
    /// Raw operator text, one itemNumber per line.
    DeleteByItemNumber { text: String },
}

impl Intent {
    /// Status title used when the intent is rejected locally.
    pub fn title(&self) -> &'static str {
        match self {
            Self::CheckConnection => "Connection check",
            Self::LoadFiles => "Load JSON files",
            Self::LoadItems => "Load items",
            Self::ValidateFirstSelected => "Validate item",
            Self::UploadSelected => "Upload selected",
            Self::UploadSourceFile => "Upload from selected file",
            Self::UploadAllFiles => "Upload all from JSON folder",
            Self::ListFailed => "Failed items list",
            Self::DeleteByItemNumber { .. } => "Delete items",
        }
    }
}

pub fn plan(state: &AppState, intent: &Intent) -> Result<Command, InputError> {
    let command = match intent {
        Intent::CheckConnection => Command::CheckConnection,
        Intent::LoadFiles => Command::LoadFiles,
        Intent::LoadItems => Command::LoadItems,
        Intent::ValidateFirstSelected => {
            let id = state
                .catalog
                .selection()
                .first()
                .cloned()
                .ok_or(InputError::NoItemsSelected)?;
            Command::ValidateItem { id }
        }
        Intent::UploadSelected => {
            let item_ids = state.catalog.selection().to_vec();
            if item_ids.is_empty() {
                return Err(InputError::NoItemsSelected);
            }
            Command::UploadSelected { item_ids }
        }
        Intent::UploadSourceFile => {
            let source = state.source().ok_or(InputError::NoSourceFile)?;
            Command::UploadSourceFile {
                source: source.to_string(),
            }
        }
        Intent::UploadAllFiles => Command::UploadAllFiles,
        Intent::ListFailed => Command::ListFailed,
        Intent::DeleteByItemNumber { text } => {
            let item_numbers = parse_item_numbers(text);
            if item_numbers.is_empty() {
                return Err(InputError::EmptyDeleteList);
            }
            Command::DeleteByItemNumber { item_numbers }
        }
    };
    Ok(command)
}

/// One itemNumber per line, trimmed, blanks dropped, first occurrence kept.
pub fn parse_item_numbers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shared::{
        domain::{ItemId, SourceFile},
        protocol::ItemsPage,
    };

    use super::*;

    fn state_with_items(ids: &[&str]) -> AppState {
        let mut state = AppState::new("http://h", 50);
        let items: Vec<_> = ids.iter().map(|id| json!({"ID": id})).collect();
        state
            .catalog
            .replace(ItemsPage::from_body(&json!({ "items": items })));
        state
    }

    #[test]
    fn selection_based_intents_need_a_selection() {
        let state = state_with_items(&["1", "2"]);
        assert_eq!(
            plan(&state, &Intent::UploadSelected),
            Err(InputError::NoItemsSelected)
        );
        assert_eq!(
            plan(&state, &Intent::ValidateFirstSelected),
            Err(InputError::NoItemsSelected)
        );
    }

    #[test]
    fn validation_targets_first_selected_id() {
        let mut state = state_with_items(&["1", "2"]);
        state.catalog.select(&ItemId::new("2")).expect("loaded");
        state.catalog.select(&ItemId::new("1")).expect("loaded");
        assert_eq!(
            plan(&state, &Intent::ValidateFirstSelected),
            Ok(Command::ValidateItem {
                id: ItemId::new("2")
            })
        );
        assert_eq!(
            plan(&state, &Intent::UploadSelected),
            Ok(Command::UploadSelected {
                item_ids: vec![ItemId::new("2"), ItemId::new("1")]
            })
        );
    }

    #[test]
    fn source_upload_needs_a_selected_file() {
        let mut state = AppState::new("http://h", 50);
        assert_eq!(
            plan(&state, &Intent::UploadSourceFile),
            Err(InputError::NoSourceFile)
        );
        state.directory.apply_listing(vec![SourceFile {
            file_name: "a.json".into(),
            item_count: 4,
        }]);
        assert_eq!(
            plan(&state, &Intent::UploadSourceFile),
            Ok(Command::UploadSourceFile {
                source: "a.json".into()
            })
        );
    }

    #[test]
    fn blank_delete_text_is_rejected() {
        let state = AppState::new("http://h", 50);
        for text in ["", "   ", "\n\r\n  \n"] {
            assert_eq!(
                plan(
                    &state,
                    &Intent::DeleteByItemNumber {
                        text: text.to_string()
                    }
                ),
                Err(InputError::EmptyDeleteList)
            );
        }
    }

    #[test]
    fn item_numbers_are_trimmed_and_deduplicated() {
        assert_eq!(
            parse_item_numbers("4069943027235\r\n 4069943027174 \n\n4069943027235\n"),
            vec!["4069943027235", "4069943027174"]
        );
    }
}

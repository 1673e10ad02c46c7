//! Inputs to the reducer.

use client_core::OperationOutcome;
use shared::{domain::ItemId, error::InputError};

use super::commands::Command;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    BaseUrlChanged(String),
    SourceSelected(String),
    QueryChanged(String),
    SelectionToggled(ItemId),
    /// Local validation failure; nothing was sent.
    Rejected {
        title: String,
        error: InputError,
    },
    OperationStarted {
        label: String,
    },
    OperationFinished {
        command: Command,
        outcome: OperationOutcome,
    },
}

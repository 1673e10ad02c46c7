use thiserror::Error;

/// Operator input rejected before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Select at least one item first.")]
    NoItemsSelected,
    #[error("Select a source file first.")]
    NoSourceFile,
    #[error("Provide at least one itemNumber.")]
    EmptyDeleteList,
    #[error("Unknown source file: {0}")]
    UnknownSourceFile(String),
    #[error("Item {0} is not in the loaded set.")]
    UnknownItem(String),
    #[error("Invalid API URL '{0}'.")]
    InvalidBaseUrl(String),
    #[error("Confirmation unavailable; operation cancelled.")]
    ConfirmationUnavailable,
}

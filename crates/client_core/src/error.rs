use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    #[error("another operation is still running: {active}")]
    Busy { active: String },
}

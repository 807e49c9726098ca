use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModeError {
    #[error("Failed to parse mode document: {0}")]
    ConfigParse(String),
    #[error("Invalid regex pattern {expression:?}: {source}")]
    InvalidPattern {
        expression: String,
        #[source]
        source: regex::Error,
    },
    #[error("Action '{action}' references capture group {index}, but its pattern has only {groups}")]
    InvalidArgIndex {
        action: String,
        index: usize,
        groups: usize,
    },
    #[error("No command for key: {key:?}")]
    NoRuleMatched { key: String },
    #[error("Row index {index} out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("Command failed to start: {0}")]
    ExecutionFailure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModeError>;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatementError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("invalid permission grant: {0}")]
    InvalidGrant(String),
}

impl From<serde_json::Error> for StatementError {
    fn from(err: serde_json::Error) -> Self {
        StatementError::InvalidJson(err.to_string())
    }
}

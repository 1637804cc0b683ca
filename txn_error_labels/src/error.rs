//! Error types for label classification support code
//!
//! Classification itself never fails; these cover parsing session fields and
//! loading a configured taxonomy.

use txn_error_codes::CodesError;

/// Result type for label crate operations
pub type LabelsResult<T> = Result<T, LabelsError>;

#[derive(Debug, thiserror::Error)]
pub enum LabelsError {
    #[error("Invalid session options: {reason}")]
    SessionOptions { reason: String },

    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] CodesError),
}

impl LabelsError {
    pub fn session_options(reason: &str) -> Self {
        Self::SessionOptions {
            reason: reason.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodesError;

/// Taxonomy categories an error code may belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    NetworkError,
    NetworkTimeoutError,
    Interruption,
    NotPrimaryError,
    StaleShardVersionError,
    NeedRetargettingError,
    WriteConcernError,
    ShutdownError,
    CancellationError,
    ExceededTimeLimitError,
    SnapshotError,
    RetriableError,
    NonResumableChangeStreamError,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 13] = [
        ErrorCategory::NetworkError,
        ErrorCategory::NetworkTimeoutError,
        ErrorCategory::Interruption,
        ErrorCategory::NotPrimaryError,
        ErrorCategory::StaleShardVersionError,
        ErrorCategory::NeedRetargettingError,
        ErrorCategory::WriteConcernError,
        ErrorCategory::ShutdownError,
        ErrorCategory::CancellationError,
        ErrorCategory::ExceededTimeLimitError,
        ErrorCategory::SnapshotError,
        ErrorCategory::RetriableError,
        ErrorCategory::NonResumableChangeStreamError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::NetworkError => "NetworkError",
            ErrorCategory::NetworkTimeoutError => "NetworkTimeoutError",
            ErrorCategory::Interruption => "Interruption",
            ErrorCategory::NotPrimaryError => "NotPrimaryError",
            ErrorCategory::StaleShardVersionError => "StaleShardVersionError",
            ErrorCategory::NeedRetargettingError => "NeedRetargettingError",
            ErrorCategory::WriteConcernError => "WriteConcernError",
            ErrorCategory::ShutdownError => "ShutdownError",
            ErrorCategory::CancellationError => "CancellationError",
            ErrorCategory::ExceededTimeLimitError => "ExceededTimeLimitError",
            ErrorCategory::SnapshotError => "SnapshotError",
            ErrorCategory::RetriableError => "RetriableError",
            ErrorCategory::NonResumableChangeStreamError => "NonResumableChangeStreamError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = CodesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CodesError::unknown_category(s))
    }
}

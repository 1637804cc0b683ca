//! Error types for the code registry and runtime taxonomy loading

use std::path::PathBuf;

/// Result type for registry operations
pub type CodesResult<T> = Result<T, CodesError>;

#[derive(Debug, thiserror::Error)]
pub enum CodesError {
    #[error("Unknown error code name '{name}'")]
    UnknownCodeName { name: String },

    #[error("Unknown error category '{name}'")]
    UnknownCategory { name: String },

    #[error("Code {code} is declared more than once (as '{first}' and '{second}')")]
    DuplicateCode {
        code: i32,
        first: String,
        second: String,
    },

    #[error("Code name '{name}' is declared more than once")]
    DuplicateName { name: String },

    #[error("Invalid taxonomy table: {reason}")]
    InvalidTable { reason: String },

    #[error("Failed to parse taxonomy TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to read taxonomy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodesError {
    pub fn unknown_code_name(name: &str) -> Self {
        Self::UnknownCodeName {
            name: name.to_string(),
        }
    }

    pub fn unknown_category(name: &str) -> Self {
        Self::UnknownCategory {
            name: name.to_string(),
        }
    }

    pub fn duplicate_code(code: i32, first: &str, second: &str) -> Self {
        Self::DuplicateCode {
            code,
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn duplicate_name(name: &str) -> Self {
        Self::DuplicateName {
            name: name.to_string(),
        }
    }

    pub fn invalid_table(reason: &str) -> Self {
        Self::InvalidTable {
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

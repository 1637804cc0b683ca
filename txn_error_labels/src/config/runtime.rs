// RUNTIME PREFERENCES

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

use txn_error_codes::TaxonomyTable;

use crate::error::LabelsResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierPreferences {
    /// Whether to log every assembled label set at debug level
    pub log_decisions: bool,

    /// Optional runtime taxonomy table. Read only by `load_taxonomy`; the
    /// loaded table must be passed to the `*_with` entry points.
    /// `get_error_labels` always uses the compiled registry.
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for ClassifierPreferences {
    fn default() -> Self {
        Self {
            log_decisions: env::var(env_vars::LOG_DECISIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            taxonomy_path: env::var(env_vars::TAXONOMY_PATH)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl ClassifierPreferences {
    /// Load the runtime taxonomy table, if one is configured
    pub fn load_taxonomy(&self) -> LabelsResult<Option<TaxonomyTable>> {
        match &self.taxonomy_path {
            Some(path) => {
                let table = TaxonomyTable::from_file(path)?;
                log::info!(
                    "Using taxonomy {} from {} ({} codes)",
                    table.version(),
                    path.display(),
                    table.len()
                );
                Ok(Some(table))
            }
            None => Ok(None),
        }
    }
}

static PREFERENCES: OnceLock<ClassifierPreferences> = OnceLock::new();

/// Process-wide preferences, read from the environment on first use
pub fn preferences() -> &'static ClassifierPreferences {
    PREFERENCES.get_or_init(ClassifierPreferences::default)
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LOG_DECISIONS: &str = "TXN_LABELS_LOG_DECISIONS";
    pub const TAXONOMY_PATH: &str = "TXN_LABELS_TAXONOMY_PATH";
}

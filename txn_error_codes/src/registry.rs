//! Compiled error code registry
//!
//! The code table is generated by build.rs from `config/error_codes.toml`.
//! Lookups go through lazily built indexes so classification stays O(1).

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::category::ErrorCategory;
use crate::code::{ErrorCode, ErrorDefinition};

// Include generated table from build.rs
include!(concat!(env!("OUT_DIR"), "/error_codes.rs"));

// ============================================================================
// INDEXES
// ============================================================================

static BY_CODE: OnceLock<HashMap<ErrorCode, &'static ErrorDefinition>> = OnceLock::new();
static BY_NAME: OnceLock<HashMap<&'static str, &'static ErrorDefinition>> = OnceLock::new();

fn by_code() -> &'static HashMap<ErrorCode, &'static ErrorDefinition> {
    BY_CODE.get_or_init(|| {
        ERROR_DEFINITIONS
            .iter()
            .map(|definition| (definition.code, definition))
            .collect()
    })
}

fn by_name() -> &'static HashMap<&'static str, &'static ErrorDefinition> {
    BY_NAME.get_or_init(|| {
        ERROR_DEFINITIONS
            .iter()
            .map(|definition| (definition.name, definition))
            .collect()
    })
}

// ============================================================================
// LOOKUP
// ============================================================================

/// Get the registry row for a code
pub fn get_definition(code: ErrorCode) -> Option<&'static ErrorDefinition> {
    by_code().get(&code).copied()
}

/// Get the registry row for a code name
pub fn get_definition_by_name(name: &str) -> Option<&'static ErrorDefinition> {
    by_name().get(name).copied()
}

/// All registered definitions, in table order
pub fn definitions() -> &'static [ErrorDefinition] {
    ERROR_DEFINITIONS
}

/// Categories of a code; empty for unknown codes
pub fn categories_of(code: ErrorCode) -> &'static [ErrorCategory] {
    get_definition(code)
        .map(|definition| definition.categories)
        .unwrap_or(&[])
}

/// Check whether a code belongs to a category
pub fn is_a(code: ErrorCode, category: ErrorCategory) -> bool {
    categories_of(code).contains(&category)
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn is_retriable_error(code: ErrorCode) -> bool {
    is_a(code, ErrorCategory::RetriableError)
}

pub fn is_snapshot_error(code: ErrorCode) -> bool {
    is_a(code, ErrorCategory::SnapshotError)
}

pub fn is_need_retargetting_error(code: ErrorCode) -> bool {
    is_a(code, ErrorCategory::NeedRetargettingError)
}

pub fn is_non_resumable_change_stream_error(code: ErrorCode) -> bool {
    is_a(code, ErrorCategory::NonResumableChangeStreamError)
}

/// Build information for the compiled table
pub mod build_info {
    /// Version string declared in the compiled TOML table
    pub fn taxonomy_version() -> &'static str {
        super::TAXONOMY_VERSION
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("TXN_CODES_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!(
            "Generated from {}/error_codes.toml (taxonomy {})",
            config_dir(),
            taxonomy_version()
        )
    }
}

//! Error code wrapper and registry row type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::ErrorCategory;
use crate::error::CodesError;
use crate::registry;

/// Numeric server error code.
///
/// Known codes are available as associated constants generated from
/// `config/error_codes.toml` (for example [`ErrorCode::WRITE_CONFLICT`]).
/// Codes missing from the registry are still representable and display as
/// `Location<N>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(i32);

impl ErrorCode {
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Registry name, if the code is known
    pub fn name(&self) -> Option<&'static str> {
        registry::get_definition(*self).map(|definition| definition.name)
    }

    pub fn is_known(&self) -> bool {
        registry::get_definition(*self).is_some()
    }

    /// Look up a code by registry name (exact, case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        registry::get_definition_by_name(name).map(|definition| definition.code)
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Location{}", self.0),
        }
    }
}

impl FromStr for ErrorCode {
    type Err = CodesError;

    /// Accepts a registry name (`WriteConflict`), a bare number (`112`) or a
    /// `Location<N>` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(code) = ErrorCode::from_name(s) {
            return Ok(code);
        }

        let numeric = s.strip_prefix("Location").unwrap_or(s);
        numeric
            .parse::<i32>()
            .map(ErrorCode::new)
            .map_err(|_| CodesError::unknown_code_name(s))
    }
}

/// One row of the error code registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDefinition {
    pub code: ErrorCode,
    pub name: &'static str,
    pub categories: &'static [ErrorCategory],
}

impl ErrorDefinition {
    pub fn is_a(&self, category: ErrorCategory) -> bool {
        self.categories.contains(&category)
    }
}

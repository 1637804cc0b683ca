//! Retry taxonomy oracle
//!
//! Consumers classify codes through [`ErrorTaxonomy`] rather than calling the
//! registry directly, so a taxonomy can be swapped for a stub in tests or for
//! a table loaded at runtime ([`TaxonomyTable`]).

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::category::ErrorCategory;
use crate::code::ErrorCode;
use crate::error::{CodesError, CodesResult};
use crate::registry;

/// Predicates over error codes used by label classification
pub trait ErrorTaxonomy: Send + Sync {
    /// Category membership test; the named predicates default to this
    fn is_a(&self, code: ErrorCode, category: ErrorCategory) -> bool;

    fn is_retriable_error(&self, code: ErrorCode) -> bool {
        self.is_a(code, ErrorCategory::RetriableError)
    }

    fn is_snapshot_error(&self, code: ErrorCode) -> bool {
        self.is_a(code, ErrorCategory::SnapshotError)
    }

    fn is_need_retargetting_error(&self, code: ErrorCode) -> bool {
        self.is_a(code, ErrorCategory::NeedRetargettingError)
    }

    fn is_non_resumable_change_stream_error(&self, code: ErrorCode) -> bool {
        self.is_a(code, ErrorCategory::NonResumableChangeStreamError)
    }
}

// ============================================================================
// COMPILED TAXONOMY
// ============================================================================

/// Taxonomy backed by the compiled registry
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryTaxonomy;

impl RegistryTaxonomy {
    pub fn version(&self) -> &'static str {
        registry::build_info::taxonomy_version()
    }
}

impl ErrorTaxonomy for RegistryTaxonomy {
    fn is_a(&self, code: ErrorCode, category: ErrorCategory) -> bool {
        registry::is_a(code, category)
    }
}

// ============================================================================
// RUNTIME TAXONOMY
// ============================================================================

#[derive(Debug, Deserialize)]
struct TableFile {
    version: String,
    #[serde(default)]
    codes: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
    name: String,
    code: i32,
    #[serde(default)]
    categories: Vec<String>,
}

/// Taxonomy loaded at runtime from the same TOML format as the compiled table
#[derive(Debug, Clone)]
pub struct TaxonomyTable {
    version: String,
    categories: HashMap<ErrorCode, Vec<ErrorCategory>>,
    names: HashMap<String, ErrorCode>,
}

impl TaxonomyTable {
    pub fn from_toml_str(content: &str) -> CodesResult<Self> {
        let file: TableFile = toml::from_str(content)?;

        if file.version.trim().is_empty() {
            return Err(CodesError::invalid_table("version must not be empty"));
        }

        let mut categories = HashMap::with_capacity(file.codes.len());
        let mut names: HashMap<String, ErrorCode> = HashMap::with_capacity(file.codes.len());

        for entry in file.codes {
            let code = ErrorCode::new(entry.code);

            if names.contains_key(&entry.name) {
                return Err(CodesError::duplicate_name(&entry.name));
            }
            if let Some((first, _)) = names.iter().find(|(_, existing)| **existing == code) {
                return Err(CodesError::duplicate_code(entry.code, first, &entry.name));
            }

            // Same name, different number than the compiled registry
            if let Some(compiled) = registry::get_definition_by_name(&entry.name) {
                if compiled.code != code {
                    log::warn!(
                        "Taxonomy {} maps {} to {}, compiled registry uses {}",
                        file.version,
                        entry.name,
                        code.value(),
                        compiled.code.value()
                    );
                }
            }

            let mut parsed = Vec::with_capacity(entry.categories.len());
            for name in &entry.categories {
                let category: ErrorCategory = name.parse()?;
                if !parsed.contains(&category) {
                    parsed.push(category);
                }
            }

            categories.insert(code, parsed);
            names.insert(entry.name, code);
        }

        log::debug!(
            "Loaded taxonomy {} with {} codes",
            file.version,
            categories.len()
        );

        Ok(Self {
            version: file.version,
            categories,
            names,
        })
    }

    pub fn from_file(path: &Path) -> CodesResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| CodesError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn code_for_name(&self, name: &str) -> Option<ErrorCode> {
        self.names.get(name).copied()
    }

    pub fn categories_of(&self, code: ErrorCode) -> &[ErrorCategory] {
        self.categories
            .get(&code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl ErrorTaxonomy for TaxonomyTable {
    fn is_a(&self, code: ErrorCode, category: ErrorCategory) -> bool {
        self.categories_of(code).contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    const SMALL_TABLE: &str = r#"
        version = "test-1"

        [[codes]]
        name = "WriteConflict"
        code = 112
        categories = ["RetriableError"]

        [[codes]]
        name = "SnapshotUnavailable"
        code = 246
        categories = ["SnapshotError", "SnapshotError"]

        [[codes]]
        name = "NoSuchTransaction"
        code = 251
    "#;

    #[test]
    fn test_registry_taxonomy_matches_registry() {
        let taxonomy = RegistryTaxonomy;
        for definition in registry::definitions() {
            for category in ErrorCategory::ALL {
                assert_eq!(
                    taxonomy.is_a(definition.code, category),
                    definition.is_a(category)
                );
            }
        }
        assert_eq!(taxonomy.version(), registry::TAXONOMY_VERSION);
    }

    #[test]
    fn test_table_from_toml() {
        let table = TaxonomyTable::from_toml_str(SMALL_TABLE).unwrap();

        assert_eq!(table.version(), "test-1");
        assert_eq!(table.len(), 3);
        assert_eq!(table.code_for_name("WriteConflict"), Some(ErrorCode::new(112)));

        assert!(table.is_retriable_error(ErrorCode::WRITE_CONFLICT));
        assert!(table.is_snapshot_error(ErrorCode::SNAPSHOT_UNAVAILABLE));
        assert_eq!(table.categories_of(ErrorCode::SNAPSHOT_UNAVAILABLE).len(), 1);
        assert!(table.categories_of(ErrorCode::NO_SUCH_TRANSACTION).is_empty());

        // Codes absent from the table belong to no category
        assert!(!table.is_retriable_error(ErrorCode::NOT_WRITABLE_PRIMARY));
    }

    #[test]
    fn test_table_rejects_unknown_category() {
        let content = r#"
            version = "bad"

            [[codes]]
            name = "WriteConflict"
            code = 112
            categories = ["TransientError"]
        "#;
        let err = TaxonomyTable::from_toml_str(content).unwrap_err();
        assert_matches!(err, CodesError::UnknownCategory { ref name } if name == "TransientError");
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let duplicate_code = r#"
            version = "dup"

            [[codes]]
            name = "First"
            code = 7

            [[codes]]
            name = "Second"
            code = 7
        "#;
        assert_matches!(
            TaxonomyTable::from_toml_str(duplicate_code),
            Err(CodesError::DuplicateCode { code: 7, .. })
        );

        let duplicate_name = r#"
            version = "dup"

            [[codes]]
            name = "First"
            code = 7

            [[codes]]
            name = "First"
            code = 8
        "#;
        assert_matches!(
            TaxonomyTable::from_toml_str(duplicate_name),
            Err(CodesError::DuplicateName { .. })
        );
    }

    #[test]
    fn test_table_rejects_empty_version_and_bad_toml() {
        assert_matches!(
            TaxonomyTable::from_toml_str("version = \"  \""),
            Err(CodesError::InvalidTable { .. })
        );
        assert_matches!(
            TaxonomyTable::from_toml_str("version = "),
            Err(CodesError::Toml(_))
        );
    }

    #[test]
    fn test_table_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL_TABLE.as_bytes()).unwrap();

        let table = TaxonomyTable::from_file(file.path()).unwrap();
        assert_eq!(table.version(), "test-1");
    }

    #[test]
    fn test_table_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        assert_matches!(
            TaxonomyTable::from_file(&missing),
            Err(CodesError::Io { .. })
        );
    }

    #[test]
    fn test_compiled_table_loads_at_runtime() {
        let content = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../config/error_codes.toml"
        ));
        let table = TaxonomyTable::from_toml_str(content).unwrap();

        assert_eq!(table.len(), registry::definitions().len());
        for definition in registry::definitions() {
            assert_eq!(table.categories_of(definition.code), definition.categories);
        }
    }
}

// build.rs - TOML-driven error code table generation
use std::collections::HashSet;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Categories understood by `ErrorCategory` in src/category.rs
const KNOWN_CATEGORIES: &[&str] = &[
    "NetworkError",
    "NetworkTimeoutError",
    "Interruption",
    "NotPrimaryError",
    "StaleShardVersionError",
    "NeedRetargettingError",
    "WriteConcernError",
    "ShutdownError",
    "CancellationError",
    "ExceededTimeLimitError",
    "SnapshotError",
    "RetriableError",
    "NonResumableChangeStreamError",
];

/// Codes the label classifier compares against by identity
const REQUIRED_CODES: &[&str] = &[
    "WriteConflict",
    "LockTimeout",
    "PreparedTransactionInProgress",
    "StaleDbVersion",
    "NoSuchTransaction",
];

#[derive(serde::Deserialize)]
struct CodeTable {
    version: String,
    codes: Vec<CodeEntry>,
}

#[derive(serde::Deserialize)]
struct CodeEntry {
    name: String,
    code: i64,
    #[serde(default)]
    categories: Vec<String>,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=TXN_CODES_CONFIG_DIR");

    let config_dir = env::var("TXN_CODES_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of txn_error_codes directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root.join(&config_dir).join("error_codes.toml");

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Error code table not found: {}\nWorkspace root: {}\nLooking for: {}/{}/error_codes.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let table: CodeTable = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_table(&table);
    generate_table(&table, &config_path);
}

fn validate_table(table: &CodeTable) {
    if table.version.trim().is_empty() {
        panic!("CODES: taxonomy version must not be empty");
    }

    let mut names = HashSet::new();
    let mut values = HashSet::new();

    for entry in &table.codes {
        if !is_pascal_case(&entry.name) {
            panic!("CODES: '{}' is not a PascalCase code name", entry.name);
        }
        if entry.code < i64::from(i32::MIN) || entry.code > i64::from(i32::MAX) {
            panic!("CODES: {} has value {} outside i32 range", entry.name, entry.code);
        }
        if !names.insert(entry.name.as_str()) {
            panic!("CODES: duplicate code name '{}'", entry.name);
        }
        if !values.insert(entry.code) {
            panic!("CODES: duplicate code value {} ({})", entry.code, entry.name);
        }

        let mut seen = HashSet::new();
        for category in &entry.categories {
            if !KNOWN_CATEGORIES.contains(&category.as_str()) {
                panic!("CODES: {} lists unknown category '{}'", entry.name, category);
            }
            if !seen.insert(category.as_str()) {
                panic!("CODES: {} lists category '{}' twice", entry.name, category);
            }
        }
    }

    for required in REQUIRED_CODES {
        if !names.contains(required) {
            panic!("CODES: required code '{}' missing from table", required);
        }
    }
}

fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// `StaleDbVersion` -> `STALE_DB_VERSION`, `NotPrimaryNoSecondaryOk` -> `NOT_PRIMARY_NO_SECONDARY_OK`
fn constant_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_uppercase());
    }

    out
}

fn generate_table(table: &CodeTable, source: &Path) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("error_codes.rs");

    let mut code = String::new();
    code.push_str("// Generated error code table from TOML configuration\n");
    let _ = writeln!(code, "// Source: {}", source.display());
    code.push_str("// DO NOT EDIT - Generated by build.rs\n\n");

    let _ = writeln!(
        code,
        "pub const TAXONOMY_VERSION: &str = {:?};\n",
        table.version
    );

    code.push_str("impl ErrorCode {\n");
    for entry in &table.codes {
        let _ = writeln!(
            code,
            "    pub const {}: ErrorCode = ErrorCode::new({});",
            constant_name(&entry.name),
            entry.code
        );
    }
    code.push_str("}\n\n");

    code.push_str("pub static ERROR_DEFINITIONS: &[ErrorDefinition] = &[\n");
    for entry in &table.codes {
        let categories = entry
            .categories
            .iter()
            .map(|c| format!("ErrorCategory::{}", c))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            code,
            "    ErrorDefinition {{ code: ErrorCode::new({}), name: {:?}, categories: &[{}] }},",
            entry.code, entry.name, categories
        );
    }
    code.push_str("];\n");

    fs::write(output_path, code).unwrap();

    println!(
        "cargo:warning=Generated {} error codes from {}",
        table.codes.len(),
        source.display()
    );
}

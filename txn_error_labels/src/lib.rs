//! Error label classification for transaction-aware clients
//!
//! Given a failed command's error code, optional write concern error code,
//! session options, command name and caller kind, decide which advisory
//! labels (`TransientTransactionError`, `RetryableWriteError`,
//! `NonResumableChangeStreamError`) the error response carries. Clients use
//! the labels to decide whether to retry a write or a whole transaction.

pub mod builder;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod label;
pub mod session;
pub mod transient;

use serde_json::{Map, Value};
use txn_error_codes::{ErrorCode, ErrorTaxonomy, RegistryTaxonomy};

// Re-export key types for library consumers
pub use builder::ErrorLabelBuilder;
pub use command::is_commit_or_abort;
pub use document::{append_error_labels, ErrorLabelsField, ERROR_LABELS_FIELD};
pub use error::{LabelsError, LabelsResult};
pub use label::{ErrorLabel, LabelSet};
pub use session::{SessionOptions, TxnNumber};
pub use transient::{is_transient_transaction_error, is_transient_transaction_error_with};

/// Classify a failed command against the compiled registry taxonomy
pub fn get_error_labels(
    session_options: &SessionOptions,
    command_name: &str,
    code: Option<ErrorCode>,
    wc_code: Option<ErrorCode>,
    is_internal_client: bool,
) -> LabelSet {
    get_error_labels_with(
        &RegistryTaxonomy,
        session_options,
        command_name,
        code,
        wc_code,
        is_internal_client,
    )
}

/// Classify a failed command against an arbitrary taxonomy
pub fn get_error_labels_with<T>(
    taxonomy: &T,
    session_options: &SessionOptions,
    command_name: &str,
    code: Option<ErrorCode>,
    wc_code: Option<ErrorCode>,
    is_internal_client: bool,
) -> LabelSet
where
    T: ErrorTaxonomy + ?Sized,
{
    ErrorLabelBuilder::new(
        taxonomy,
        session_options,
        command_name,
        code,
        wc_code,
        is_internal_client,
    )
    .build()
}

/// `{"errorLabels": [...]}` for the failed command, or `{}` when no label applies
pub fn error_labels_document(
    session_options: &SessionOptions,
    command_name: &str,
    code: Option<ErrorCode>,
    wc_code: Option<ErrorCode>,
    is_internal_client: bool,
) -> Map<String, Value> {
    error_labels_document_with(
        &RegistryTaxonomy,
        session_options,
        command_name,
        code,
        wc_code,
        is_internal_client,
    )
}

pub fn error_labels_document_with<T>(
    taxonomy: &T,
    session_options: &SessionOptions,
    command_name: &str,
    code: Option<ErrorCode>,
    wc_code: Option<ErrorCode>,
    is_internal_client: bool,
) -> Map<String, Value>
where
    T: ErrorTaxonomy + ?Sized,
{
    let labels = get_error_labels_with(
        taxonomy,
        session_options,
        command_name,
        code,
        wc_code,
        is_internal_client,
    );
    document::labels_document(&labels)
}

//! Server error code registry and retry taxonomy
//!
//! Single source of truth for error codes, their categories, and the
//! classification predicates consumed by error label assembly.

pub mod category;
pub mod code;
pub mod error;
pub mod registry;
pub mod taxonomy;

// Re-export key types for library consumers
pub use category::ErrorCategory;
pub use code::{ErrorCode, ErrorDefinition};
pub use error::{CodesError, CodesResult};
pub use registry::{
    is_need_retargetting_error, is_non_resumable_change_stream_error, is_retriable_error,
    is_snapshot_error,
};
pub use taxonomy::{ErrorTaxonomy, RegistryTaxonomy, TaxonomyTable};

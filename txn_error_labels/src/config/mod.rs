//! Configuration module for label classification
//!
//! The code table itself is compiled in by `txn_error_codes`; this module only
//! carries runtime preferences read from the environment.

pub mod runtime;

pub use runtime::{preferences, ClassifierPreferences};

//! Session options seen by the classifier

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LabelsError, LabelsResult};

pub type TxnNumber = i64;

/// Session fields of the failing command.
///
/// `autocommit` is deliberately tri-state: absent means the operation is not
/// part of a multi-statement transaction, present (always `false`) means it
/// is. Only presence is read during classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    #[serde(rename = "txnNumber", default, skip_serializing_if = "Option::is_none")]
    pub txn_number: Option<TxnNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocommit: Option<bool>,
}

impl SessionOptions {
    /// No transaction number: neither a retryable write nor a transaction
    pub fn none() -> Self {
        Self::default()
    }

    /// Standalone retryable write
    pub fn retryable_write(txn_number: TxnNumber) -> Self {
        Self {
            txn_number: Some(txn_number),
            autocommit: None,
        }
    }

    /// Statement of a multi-statement transaction
    pub fn transaction(txn_number: TxnNumber) -> Self {
        Self {
            txn_number: Some(txn_number),
            autocommit: Some(false),
        }
    }

    pub fn has_txn_number(&self) -> bool {
        self.txn_number.is_some()
    }

    pub fn has_autocommit(&self) -> bool {
        self.autocommit.is_some()
    }

    /// Read `txnNumber` and `autocommit` out of a command document.
    ///
    /// Other fields are ignored. Field types are checked, values are not:
    /// whether `autocommit: true` is acceptable is the session layer's call.
    pub fn from_command(command: &Value) -> LabelsResult<Self> {
        let object = command
            .as_object()
            .ok_or_else(|| LabelsError::session_options("command must be a document"))?;

        let txn_number = match object.get("txnNumber") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_i64().ok_or_else(|| {
                LabelsError::session_options(&format!(
                    "txnNumber must be an integer, found {}",
                    value
                ))
            })?),
        };

        let autocommit = match object.get("autocommit") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_bool().ok_or_else(|| {
                LabelsError::session_options(&format!(
                    "autocommit must be a boolean, found {}",
                    value
                ))
            })?),
        };

        Ok(Self {
            txn_number,
            autocommit,
        })
    }
}

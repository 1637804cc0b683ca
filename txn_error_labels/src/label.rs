//! Error labels and the ordered set returned by classification

use serde::{Serialize, Serializer};
use std::fmt;

/// Advisory label attached to an error response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLabel {
    /// The whole transaction may be retried
    TransientTransaction,
    /// The write, or the transaction commit/abort, may be retried
    RetryableWrite,
    /// The change stream cannot be resumed
    NonResumableChangeStream,
}

impl ErrorLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorLabel::TransientTransaction => "TransientTransactionError",
            ErrorLabel::RetryableWrite => "RetryableWriteError",
            ErrorLabel::NonResumableChangeStream => "NonResumableChangeStreamError",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TransientTransactionError" => Some(ErrorLabel::TransientTransaction),
            "RetryableWriteError" => Some(ErrorLabel::RetryableWrite),
            "NonResumableChangeStreamError" => Some(ErrorLabel::NonResumableChangeStream),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Labels in assembly order. At most one of each label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: Vec<ErrorLabel>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, label: ErrorLabel) {
        debug_assert!(!self.contains(label), "duplicate label {}", label);
        self.labels.push(label);
    }

    pub fn contains(&self, label: ErrorLabel) -> bool {
        self.labels.contains(&label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ErrorLabel> + '_ {
        self.labels.iter().copied()
    }

    pub fn as_slice(&self) -> &[ErrorLabel] {
        &self.labels
    }

    /// Wire names, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.labels.iter().map(ErrorLabel::as_str).collect()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(", "))
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = ErrorLabel;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ErrorLabel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            ErrorLabel::TransientTransaction.as_str(),
            "TransientTransactionError"
        );
        assert_eq!(ErrorLabel::RetryableWrite.as_str(), "RetryableWriteError");
        assert_eq!(
            ErrorLabel::NonResumableChangeStream.as_str(),
            "NonResumableChangeStreamError"
        );

        for label in [
            ErrorLabel::TransientTransaction,
            ErrorLabel::RetryableWrite,
            ErrorLabel::NonResumableChangeStream,
        ] {
            assert_eq!(ErrorLabel::from_str(label.as_str()), Some(label));
        }
        assert_eq!(ErrorLabel::from_str("TransientTransaction"), None);
    }

    #[test]
    fn test_label_set_keeps_insertion_order() {
        let mut set = LabelSet::new();
        assert!(set.is_empty());

        set.push(ErrorLabel::RetryableWrite);
        set.push(ErrorLabel::NonResumableChangeStream);

        assert_eq!(set.len(), 2);
        assert!(set.contains(ErrorLabel::RetryableWrite));
        assert!(!set.contains(ErrorLabel::TransientTransaction));
        assert_eq!(
            set.names(),
            vec!["RetryableWriteError", "NonResumableChangeStreamError"]
        );
        assert_eq!(
            set.to_string(),
            "[RetryableWriteError, NonResumableChangeStreamError]"
        );
    }

    #[test]
    fn test_label_set_serializes_as_array() {
        let mut set = LabelSet::new();
        set.push(ErrorLabel::TransientTransaction);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["TransientTransactionError"]"#);
        assert_eq!(serde_json::to_string(&LabelSet::new()).unwrap(), "[]");
    }
}

//! Embedding labels into an outbound error document
//!
//! The `errorLabels` field is only ever written when at least one label
//! applies; an empty array is never serialized.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::label::LabelSet;

/// Field name carrying labels in an error response
pub const ERROR_LABELS_FIELD: &str = "errorLabels";

/// Serde helper for response structs that flatten the labels field in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorLabelsField {
    #[serde(rename = "errorLabels", skip_serializing_if = "LabelSet::is_empty")]
    pub labels: LabelSet,
}

impl From<LabelSet> for ErrorLabelsField {
    fn from(labels: LabelSet) -> Self {
        Self { labels }
    }
}

/// Insert `errorLabels` into `document` when `labels` is non-empty.
/// Returns whether the field was written.
pub fn append_error_labels(document: &mut Map<String, Value>, labels: &LabelSet) -> bool {
    if labels.is_empty() {
        return false;
    }

    let array = labels
        .iter()
        .map(|label| Value::String(label.as_str().to_string()))
        .collect();
    document.insert(ERROR_LABELS_FIELD.to_string(), Value::Array(array));
    true
}

/// `{"errorLabels": [...]}`, or `{}` when no label applies
pub fn labels_document(labels: &LabelSet) -> Map<String, Value> {
    let mut document = Map::new();
    append_error_labels(&mut document, labels);
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::ErrorLabel;
    use serde_json::json;

    fn set(labels: &[ErrorLabel]) -> LabelSet {
        let mut set = LabelSet::new();
        for label in labels {
            set.push(*label);
        }
        set
    }

    #[test]
    fn test_empty_set_writes_nothing() {
        let mut document = Map::new();
        document.insert("ok".to_string(), json!(0));

        assert!(!append_error_labels(&mut document, &LabelSet::new()));
        assert_eq!(Value::Object(document), json!({"ok": 0}));
        assert!(labels_document(&LabelSet::new()).is_empty());
    }

    #[test]
    fn test_labels_written_in_order() {
        let labels = set(&[
            ErrorLabel::RetryableWrite,
            ErrorLabel::NonResumableChangeStream,
        ]);

        let document = labels_document(&labels);
        assert_eq!(
            Value::Object(document),
            json!({"errorLabels": ["RetryableWriteError", "NonResumableChangeStreamError"]})
        );
    }

    #[test]
    fn test_flattened_field_in_response_struct() {
        #[derive(Serialize)]
        struct ErrorReply {
            ok: i32,
            code: i32,
            #[serde(flatten)]
            labels: ErrorLabelsField,
        }

        let reply = ErrorReply {
            ok: 0,
            code: 112,
            labels: set(&[ErrorLabel::TransientTransaction]).into(),
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"ok": 0, "code": 112, "errorLabels": ["TransientTransactionError"]})
        );

        let reply = ErrorReply {
            ok: 0,
            code: 11000,
            labels: ErrorLabelsField::default(),
        };
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"ok": 0, "code": 11000})
        );
    }
}

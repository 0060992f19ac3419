//! JSON export and validated import of the whole board.
//!
//! # Responsibility
//! - Render the topic collection as a pretty JSON document.
//! - Validate external documents into typed topics before they reach state.
//!
//! # Invariants
//! - Import is all-or-nothing: any invalid record rejects the document.
//! - Export followed by import yields an identical topic sequence.

use crate::model::topic::Topic;
use crate::repo::topic_repo::find_duplicate_id;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// File name offered for board exports.
pub const EXPORT_FILE_NAME: &str = "knowledge-board.json";

/// Rejection reasons for imported documents.
#[derive(Debug)]
pub enum ImportError {
    /// Text is not JSON.
    InvalidJson(serde_json::Error),
    /// Top-level value is not an array.
    NotAnArray { found: &'static str },
    /// Element at `index` is not a topic record.
    InvalidRecord { index: usize, message: String },
    /// A topic id repeats, or a subtopic id repeats within its topic.
    DuplicateId(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(err) => write!(f, "import file is not valid JSON: {err}"),
            Self::NotAnArray { found } => {
                write!(f, "import file must contain a JSON array, found {found}")
            }
            Self::InvalidRecord { index, message } => {
                write!(f, "topic #{index} is invalid: {message}")
            }
            Self::DuplicateId(id) => write!(f, "import file repeats id `{id}`"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

/// Serializes topics as JSON with 2-space indentation.
pub fn export_json(topics: &[Topic]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(topics)
}

/// Parses and validates an imported board document.
///
/// # Errors
/// - `InvalidJson` / `NotAnArray` for documents of the wrong shape.
/// - `InvalidRecord` when a topic or subtopic lacks a string `id`/`title` or
///   carries a field of the wrong type.
/// - `DuplicateId` when ids are not unique in their scope.
pub fn parse_import(text: &str) -> Result<Vec<Topic>, ImportError> {
    let document: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    let records = match document {
        Value::Array(records) => records,
        other => {
            return Err(ImportError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    let topics = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<Topic>(record).map_err(|err| ImportError::InvalidRecord {
                index,
                message: err.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(id) = find_duplicate_id(&topics) {
        return Err(ImportError::DuplicateId(id.to_string()));
    }

    Ok(topics)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::{export_json, parse_import, ImportError};
    use crate::model::seed::seed_topics;

    #[test]
    fn export_uses_two_space_indentation() {
        let json = export_json(&seed_topics()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"topic-aws\""));
    }

    #[test]
    fn export_then_import_is_identity() {
        let topics = seed_topics();
        let json = export_json(&topics).unwrap();
        assert_eq!(parse_import(&json).unwrap(), topics);
    }

    #[test]
    fn empty_array_is_a_valid_board() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    #[test]
    fn object_payload_is_rejected() {
        let err = parse_import(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            parse_import("[{"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let topics = parse_import(r#"[{"id":"t1","title":"Terraform"}]"#).unwrap();
        assert_eq!(topics[0].title, "Terraform");
        assert!(topics[0].tags.is_empty());
        assert!(topics[0].subtopics.is_empty());
        assert_eq!(topics[0].summary, "");
    }

    #[test]
    fn record_without_id_is_rejected_with_index() {
        let err = parse_import(r#"[{"id":"t1","title":"A"},{"title":"B"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord { index: 1, .. }));

        let err = parse_import(r#"[{"id":"t1","title":"A","tags":"cloud"}]"#).unwrap_err();
        assert!(matches!(err, ImportError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn duplicate_subtopic_ids_are_rejected() {
        let text = r#"[{"id":"t1","title":"A","subtopics":[
            {"id":"s1","title":"x"},{"id":"s1","title":"y"}]}]"#;
        assert!(matches!(
            parse_import(text),
            Err(ImportError::DuplicateId(id)) if id == "s1"
        ));
    }
}

//! Extraction of the authoritative criteria set from a criteria document.
//!
//! Two shapes are in circulation and both normalize into one
//! [`SourceCriteria`] map:
//!
//! ```text
//! flat:    {"kriterien": [{..}, ..]}  or  [{..}, ..]
//! legacy:  {"kategorien": [{"kriterien": [..], "unterkategorien": [..]}]}
//! ```
//!
//! Within a criterion, `id` falls back to `tag`, `status` prefers the nested
//! `pruefung.status`, and `prio` prefers the top-level field over
//! `pruefung.prio`.

use std::path::Path;

use krit_core::entities::{SourceCriteria, SourceCriterion};
use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;

const SHAPE_HINT: &str =
    "expected a criteria list, {\"kriterien\": [..]} or {\"kategorien\": [..]}";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceDocument {
    Legacy(LegacyDocument),
    Flat(FlatDocument),
    List(Vec<Value>),
}

#[derive(Debug, Deserialize)]
struct FlatDocument {
    kriterien: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct LegacyDocument {
    kategorien: Vec<Category>,
    #[serde(default)]
    kriterien: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(default)]
    kriterien: Vec<Value>,
    #[serde(default)]
    unterkategorien: Vec<Category>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCriterion {
    id: Option<Value>,
    tag: Option<Value>,
    status: Option<Value>,
    prio: Option<Value>,
    pruefung: Option<RawReview>,
}

#[derive(Debug, Default, Deserialize)]
struct RawReview {
    status: Option<Value>,
    prio: Option<Value>,
}

impl RawCriterion {
    fn normalize(self) -> Option<SourceCriterion> {
        let id = self
            .id
            .as_ref()
            .and_then(scalar_text)
            .or_else(|| self.tag.as_ref().and_then(scalar_text))?;

        let review = self.pruefung.unwrap_or_default();
        let status = review
            .status
            .as_ref()
            .and_then(scalar_text)
            .or_else(|| self.status.as_ref().and_then(scalar_text));
        let prio = self
            .prio
            .as_ref()
            .and_then(integer)
            .or_else(|| review.prio.as_ref().and_then(integer));

        Some(SourceCriterion { id, status, prio })
    }
}

/// Non-empty trimmed text of a string or number.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl SourceDocument {
    fn into_raw_items(self) -> Vec<Value> {
        match self {
            Self::Flat(doc) => doc.kriterien,
            Self::List(items) => items,
            Self::Legacy(doc) => {
                let mut items = doc.kriterien;
                let mut stack: Vec<Category> = doc.kategorien.into_iter().rev().collect();
                while let Some(category) = stack.pop() {
                    items.extend(category.kriterien);
                    stack.extend(category.unterkategorien.into_iter().rev());
                }
                items
            }
        }
    }
}

/// Normalize a parsed criteria document into a map keyed by criterion id.
///
/// Items without a resolvable id are skipped. For duplicate ids the first
/// occurrence wins.
///
/// # Errors
///
/// Returns the shape mismatch if the document is neither flat nor legacy.
pub fn load_kriterien_source(document: Value) -> Result<SourceCriteria, String> {
    let parsed: SourceDocument =
        serde_json::from_value(document).map_err(|_| SHAPE_HINT.to_string())?;

    let mut criteria = SourceCriteria::new();
    for item in parsed.into_raw_items() {
        let Some(criterion) = serde_json::from_value::<RawCriterion>(item)
            .ok()
            .and_then(RawCriterion::normalize)
        else {
            tracing::debug!("skipping criterion without resolvable id");
            continue;
        };

        if criteria.contains_key(&criterion.id) {
            tracing::warn!(id = %criterion.id, "duplicate criterion id in source; keeping first");
            continue;
        }
        criteria.insert(criterion.id.clone(), criterion);
    }
    Ok(criteria)
}

/// Read and normalize the criteria document at `path`.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read and
/// `StoreError::MalformedSource` if it is not JSON of a known shape.
pub fn load_kriterien_file(path: &Path) -> Result<SourceCriteria, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let document: Value = serde_json::from_str(&raw).map_err(|e| StoreError::MalformedSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let criteria = load_kriterien_source(document).map_err(|reason| StoreError::MalformedSource {
        path: path.to_path_buf(),
        reason,
    })?;

    if criteria.is_empty() {
        tracing::warn!(path = %path.display(), "criteria document contains no usable criteria");
    }
    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn ids(criteria: &SourceCriteria) -> Vec<&str> {
        criteria.keys().map(String::as_str).collect()
    }

    #[test]
    fn flat_document_with_nested_review() {
        let doc = json!({
            "kriterien": [
                {"id": "K1", "pruefung": {"status": "offen", "prio": 2}},
                {"id": "K2", "status": "erfuellt", "prio": 7}
            ]
        });
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(criteria["K1"], SourceCriterion::new("K1", Some("offen"), Some(2)));
        assert_eq!(criteria["K2"], SourceCriterion::new("K2", Some("erfuellt"), Some(7)));
    }

    #[test]
    fn bare_list_is_flat() {
        let doc = json!([{"tag": "T-1"}, {"id": 42, "prio": "3"}]);
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(ids(&criteria), vec!["42", "T-1"]);
        assert_eq!(criteria["42"].prio, Some(3));
        assert_eq!(criteria["T-1"].status, None);
    }

    #[test]
    fn top_level_prio_wins_over_review_prio() {
        let doc = json!({"kriterien": [{"id": "K1", "prio": 9, "pruefung": {"prio": 1}}]});
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(criteria["K1"].prio, Some(9));
    }

    #[test]
    fn review_status_wins_over_top_level_status() {
        let doc = json!({"kriterien": [{"id": "K1", "status": "alt", "pruefung": {"status": "neu"}}]});
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(criteria["K1"].status.as_deref(), Some("neu"));
    }

    #[test]
    fn legacy_tree_is_flattened() {
        let doc = json!({
            "kategorien": [
                {
                    "name": "Eignung",
                    "kriterien": [{"id": "E1", "prio": 5}],
                    "unterkategorien": [
                        {"name": "Referenzen", "kriterien": [{"tag": "E1.1"}]},
                        {"name": "Leer"}
                    ]
                },
                {"name": "Zuschlag", "unterkategorien": [{"kriterien": [{"id": "Z1"}]}]}
            ]
        });
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(ids(&criteria), vec!["E1", "E1.1", "Z1"]);
        assert_eq!(criteria["E1"].prio, Some(5));
    }

    #[test]
    fn unresolvable_ids_are_skipped() {
        let doc = json!({"kriterien": [
            {"status": "offen"},
            {"id": "   "},
            {"id": null, "tag": ""},
            "not-an-object",
            {"id": {"nested": true}},
            {"id": "K1"}
        ]});
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(ids(&criteria), vec!["K1"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let doc = json!([{"id": "K1", "prio": 1}, {"id": "K1", "prio": 2}]);
        let criteria = load_kriterien_source(doc).unwrap();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria["K1"].prio, Some(1));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        assert!(load_kriterien_source(json!({"items": []})).is_err());
        assert!(load_kriterien_source(json!("kriterien")).is_err());
    }

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(load_kriterien_source(json!({"kriterien": []})).unwrap().is_empty());
    }

    #[test]
    fn file_with_invalid_json_is_malformed() {
        let temp = tempfile::TempDir::new().expect("tempdir should create");
        let path = temp.path().join("kriterien.json");
        std::fs::write(&path, "{not json").expect("file should write");
        assert!(matches!(
            load_kriterien_file(&path),
            Err(StoreError::MalformedSource { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = tempfile::TempDir::new().expect("tempdir should create");
        assert!(matches!(
            load_kriterien_file(&temp.path().join("missing.json")),
            Err(StoreError::Io { .. })
        ));
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A criterion as published in the authoritative criteria document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceCriterion {
    pub id: String,
    pub status: Option<String>,
    pub prio: Option<i64>,
}

impl SourceCriterion {
    pub fn new(id: impl Into<String>, status: Option<&str>, prio: Option<i64>) -> Self {
        Self {
            id: id.into(),
            status: status.map(str::to_owned),
            prio,
        }
    }
}

/// Normalized source set keyed by criterion id.
///
/// Ordered so reconciliation appends events in a stable order.
pub type SourceCriteria = std::collections::BTreeMap<String, SourceCriterion>;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventKind;

/// One immutable record in an entry's audit log.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEvent {
    /// UTC time of the append.
    pub ts: DateTime<Utc>,

    #[serde(rename = "typ")]
    pub kind: EventKind,

    /// Source status at the time of the event. Compared by dedupe, ignored by
    /// state derivation.
    #[serde(rename = "quelle_status", default)]
    pub source_status: Option<String>,

    /// Free-form payload such as reviewer notes.
    #[serde(rename = "ergebnis", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    #[serde(rename = "akteur")]
    pub actor: String,
}

impl AuditEvent {
    /// The dedupe key of this event.
    #[must_use]
    pub fn dedupe_key(&self) -> (EventKind, Option<&str>) {
        (self.kind, self.source_status.as_deref())
    }
}

/// An event that has not been appended yet.
///
/// The timestamp is assigned on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEvent {
    pub kind: EventKind,
    pub source_status: Option<String>,
    pub result: Option<serde_json::Value>,
    pub actor: String,
}

impl PendingEvent {
    pub fn new(kind: EventKind, actor: impl Into<String>) -> Self {
        Self {
            kind,
            source_status: None,
            result: None,
            actor: actor.into(),
        }
    }

    #[must_use]
    pub fn with_source_status(mut self, status: Option<&str>) -> Self {
        self.source_status = status.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn with_result(mut self, result: Option<serde_json::Value>) -> Self {
        self.result = result;
        self
    }

    pub(crate) fn into_event(self, ts: DateTime<Utc>) -> AuditEvent {
        AuditEvent {
            ts,
            kind: self.kind,
            source_status: self.source_status,
            result: self.result,
            actor: self.actor,
        }
    }
}

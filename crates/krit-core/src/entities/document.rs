use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditEntry;
use crate::errors::CoreError;

/// Current on-disk schema version of audit documents.
pub const AUDIT_SCHEMA_VERSION: u32 = 1;

const fn default_schema_version() -> u32 {
    AUDIT_SCHEMA_VERSION
}

/// Identifies the (project, bidder) pair an audit document belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditMeta {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(rename = "projekt")]
    pub project: String,
    #[serde(rename = "bieter")]
    pub bidder: String,
}

impl AuditMeta {
    pub fn new(project: impl Into<String>, bidder: impl Into<String>) -> Self {
        Self {
            schema_version: AUDIT_SCHEMA_VERSION,
            project: project.into(),
            bidder: bidder.into(),
        }
    }
}

/// Per-bidder audit document, the unit of persistence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditDocument {
    pub meta: AuditMeta,
    #[serde(rename = "kriterien", default)]
    pub entries: Vec<AuditEntry>,
}

impl AuditDocument {
    /// An empty document for the given pair.
    #[must_use]
    pub const fn new(meta: AuditMeta) -> Self {
        Self {
            meta,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&AuditEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: &str) -> Option<&mut AuditEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Like [`Self::entry_mut`], but a missing id is an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no entry has this id.
    pub fn require_entry_mut(&mut self, id: &str) -> Result<&mut AuditEntry, CoreError> {
        self.entry_mut(id).ok_or_else(|| CoreError::NotFound {
            entity_type: "criterion".to_string(),
            id: id.to_string(),
        })
    }

    /// Like [`Self::entry`], but a missing id is an error.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no entry has this id.
    pub fn require_entry(&self, id: &str) -> Result<&AuditEntry, CoreError> {
        self.entry(id).ok_or_else(|| CoreError::NotFound {
            entity_type: "criterion".to_string(),
            id: id.to_string(),
        })
    }

    /// Restore the canonical `(-prio, id)` order.
    pub fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    /// Recompute every cached state. Returns how many entries were stale.
    pub fn refresh_states(&mut self) -> usize {
        self.entries
            .iter_mut()
            .map(AuditEntry::refresh_state)
            .filter(|changed| *changed)
            .count()
    }
}

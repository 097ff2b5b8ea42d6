//! Response types returned by the audit service and printed by `krit`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AuditEntry;
use crate::enums::Zustand;

/// Outcome of one reconciliation run over a single audit document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncStats {
    pub created: u32,
    pub updated: u32,
    pub removed: u32,
    pub unchanged: u32,
    /// Whether anything changed, i.e. whether the document must be persisted.
    pub wrote_file: bool,
}

impl SyncStats {
    /// Whether the run mutated structure (created, updated or removed entries).
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.created > 0 || self.updated > 0 || self.removed > 0
    }
}

/// Per-bidder result inside a [`SyncResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum BidderSyncResult {
    Synced {
        bidder: String,
        created: u32,
        updated: u32,
        removed: u32,
        unchanged: u32,
        wrote_file: bool,
        total_entries: u32,
    },
    Failed {
        bidder: String,
        error: String,
    },
}

impl BidderSyncResult {
    #[must_use]
    pub fn synced(bidder: impl Into<String>, stats: SyncStats, total_entries: u32) -> Self {
        Self::Synced {
            bidder: bidder.into(),
            created: stats.created,
            updated: stats.updated,
            removed: stats.removed,
            unchanged: stats.unchanged,
            wrote_file: stats.wrote_file,
            total_entries,
        }
    }

    #[must_use]
    pub fn bidder(&self) -> &str {
        match self {
            Self::Synced { bidder, .. } | Self::Failed { bidder, .. } => bidder,
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Sum of all successful per-bidder results.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncTotals {
    pub created: u32,
    pub updated: u32,
    pub removed: u32,
    pub unchanged: u32,
    pub files_written: u32,
}

impl SyncTotals {
    pub fn add(&mut self, result: &BidderSyncResult) {
        if let BidderSyncResult::Synced {
            created,
            updated,
            removed,
            unchanged,
            wrote_file,
            ..
        } = result
        {
            self.created += created;
            self.updated += updated;
            self.removed += removed;
            self.unchanged += unchanged;
            self.files_written += u32::from(*wrote_file);
        }
    }
}

/// Response from `krit sync`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncResponse {
    pub project: String,
    /// Number of criteria found in the source document.
    pub criteria: u32,
    pub bidders: Vec<BidderSyncResult>,
    pub totals: SyncTotals,
    pub failed: u32,
}

/// Response from `krit event`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEventResponse {
    /// The append was suppressed by dedupe.
    pub skipped: bool,
    pub wrote_file: bool,
    pub entry: AuditEntry,
}

/// Response from `krit show`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ShowResponse {
    pub project: String,
    pub bidder: String,
    pub entry: AuditEntry,
}

/// One row of `krit list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntrySummary {
    pub id: String,
    pub status: Option<String>,
    pub prio: Option<i64>,
    pub zustand: Zustand,
    pub events: u32,
}

impl From<&AuditEntry> for EntrySummary {
    fn from(entry: &AuditEntry) -> Self {
        Self {
            id: entry.id.clone(),
            status: entry.status.clone(),
            prio: entry.prio,
            zustand: entry.state,
            events: u32::try_from(entry.events.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Number of entries per derived state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StateCounts {
    pub synchronisiert: u32,
    pub geprueft: u32,
    pub freigegeben: u32,
    pub abgelehnt: u32,
    /// Soft-deleted entries, counted in addition to their state.
    pub entfernt: u32,
}

impl StateCounts {
    pub fn record(&mut self, entry: &AuditEntry) {
        let slot = match entry.state {
            Zustand::Synchronisiert => &mut self.synchronisiert,
            Zustand::Geprueft => &mut self.geprueft,
            Zustand::Freigegeben => &mut self.freigegeben,
            Zustand::Abgelehnt => &mut self.abgelehnt,
        };
        *slot += 1;
        if entry.is_removed() {
            self.entfernt += 1;
        }
    }
}

/// Response from `krit list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListResponse {
    pub project: String,
    pub bidder: String,
    pub entries: Vec<EntrySummary>,
    pub counts: StateCounts,
}

/// Response from `krit bidders`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BiddersResponse {
    pub project: String,
    pub bidders: Vec<String>,
}

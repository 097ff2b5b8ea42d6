//! Event kinds and derived lifecycle states for criterion audit entries.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the on-disk spelling inside audit documents.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Kind of an event recorded in an entry's audit log.
///
/// ```text
/// kopiert ──► ki_pruefung / mensch_pruefung ──► freigabe / ablehnung
///    ▲                                               │
///    └──────────────────── reset ◄───────────────────┘
/// entfernt: terminal marker for soft deletion, never affects the state
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Criterion copied (or re-copied) from the source document.
    Kopiert,
    /// Automated (AI) review.
    KiPruefung,
    /// Human review.
    MenschPruefung,
    /// Approval.
    Freigabe,
    /// Rejection.
    Ablehnung,
    /// Voids all prior review bookkeeping for the entry.
    Reset,
    /// Criterion disappeared from the source.
    Entfernt,
}

impl EventKind {
    pub const ALL: [Self; 7] = [
        Self::Kopiert,
        Self::KiPruefung,
        Self::MenschPruefung,
        Self::Freigabe,
        Self::Ablehnung,
        Self::Reset,
        Self::Entfernt,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kopiert => "kopiert",
            Self::KiPruefung => "ki_pruefung",
            Self::MenschPruefung => "mensch_pruefung",
            Self::Freigabe => "freigabe",
            Self::Ablehnung => "ablehnung",
            Self::Reset => "reset",
            Self::Entfernt => "entfernt",
        }
    }

    /// Whether this event records a review (automated or human).
    #[must_use]
    pub const fn is_review(self) -> bool {
        matches!(self, Self::KiPruefung | Self::MenschPruefung)
    }

    /// Whether this event records a final decision.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Freigabe | Self::Ablehnung)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Zustand
// ---------------------------------------------------------------------------

/// Derived lifecycle state of an audit entry.
///
/// Never stored as authoritative data: it is a cache of
/// [`derive_zustand`](crate::derive::derive_zustand) over the entry's events.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Zustand {
    #[default]
    Synchronisiert,
    Geprueft,
    Freigegeben,
    Abgelehnt,
}

impl Zustand {
    pub const ALL: [Self; 4] = [
        Self::Synchronisiert,
        Self::Geprueft,
        Self::Freigegeben,
        Self::Abgelehnt,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synchronisiert => "synchronisiert",
            Self::Geprueft => "geprueft",
            Self::Freigegeben => "freigegeben",
            Self::Abgelehnt => "abgelehnt",
        }
    }

    /// Final states are voided by a `reset` when the source criterion drifts.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Freigegeben | Self::Abgelehnt)
    }
}

impl fmt::Display for Zustand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::derive::derive_zustand;
use crate::entities::{AuditEvent, PendingEvent};
use crate::enums::Zustand;

/// Status sentinel marking a soft-deleted entry.
pub const STATUS_REMOVED: &str = "entfernt";

/// Controls how [`AuditEntry::append_event`] treats a new event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendPolicy {
    /// Skip the append when the last event has the same `(kind, source_status)`.
    pub dedupe: bool,
    /// Recompute the cached state after a successful append.
    pub update_state: bool,
}

impl AppendPolicy {
    /// Dedupe on, state refresh on.
    pub const DEFAULT: Self = Self {
        dedupe: true,
        update_state: true,
    };

    /// Append unconditionally but keep the state refresh.
    pub const FORCE: Self = Self {
        dedupe: false,
        update_state: true,
    };

    /// Dedupe on, cached state left untouched.
    pub const KEEP_STATE: Self = Self {
        dedupe: true,
        update_state: false,
    };
}

impl Default for AppendPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Audit record of one criterion inside a bidder's audit document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: String,

    /// Last known source status, or [`STATUS_REMOVED`].
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub prio: Option<i64>,

    /// Reviewer assessment (free text or number).
    #[serde(rename = "bewertung", default)]
    pub assessment: Option<serde_json::Value>,

    /// Cached result of [`derive_zustand`] over `events`.
    #[serde(rename = "zustand", default)]
    pub state: Zustand,

    /// Append-only, never reordered.
    #[serde(default)]
    pub events: Vec<AuditEvent>,
}

impl AuditEntry {
    /// A fresh entry without events.
    #[must_use]
    pub fn new(id: impl Into<String>, status: Option<String>, prio: Option<i64>) -> Self {
        Self {
            id: id.into(),
            status,
            prio,
            assessment: None,
            state: Zustand::Synchronisiert,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.status.as_deref() == Some(STATUS_REMOVED)
    }

    #[must_use]
    pub fn last_event(&self) -> Option<&AuditEvent> {
        self.events.last()
    }

    /// Append an event stamped with the current time.
    ///
    /// Returns `false` when the append was suppressed by dedupe.
    pub fn append_event(&mut self, event: PendingEvent, policy: AppendPolicy) -> bool {
        self.append_event_at(event, policy, Utc::now())
    }

    /// Append an event stamped with `at`.
    ///
    /// The stamp is clamped so it is never earlier than the last event's,
    /// keeping the log monotonic even if the wall clock steps back.
    pub fn append_event_at(
        &mut self,
        event: PendingEvent,
        policy: AppendPolicy,
        at: DateTime<Utc>,
    ) -> bool {
        if policy.dedupe
            && self.last_event().is_some_and(|last| {
                last.dedupe_key() == (event.kind, event.source_status.as_deref())
            })
        {
            return false;
        }

        let ts = self.last_event().map_or(at, |last| last.ts.max(at));
        self.events.push(event.into_event(ts));

        if policy.update_state {
            self.refresh_state();
        }
        true
    }

    /// Recompute the cached state. Returns `true` if it changed.
    pub fn refresh_state(&mut self) -> bool {
        let derived = derive_zustand(&self.events);
        let changed = derived != self.state;
        self.state = derived;
        changed
    }

    /// Sort key: descending prio with missing prio lowest, then ascending id.
    #[must_use]
    pub fn sort_key(&self) -> (std::cmp::Reverse<i64>, &str) {
        (std::cmp::Reverse(self.prio.unwrap_or(-1)), self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::enums::EventKind;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn pending(kind: EventKind, status: Option<&str>) -> PendingEvent {
        PendingEvent::new(kind, "tester").with_source_status(status)
    }

    #[test]
    fn dedupe_suppresses_identical_last_event() {
        let mut entry = AuditEntry::new("K1", Some("offen".into()), Some(1));
        assert!(entry.append_event(pending(EventKind::Kopiert, Some("offen")), AppendPolicy::DEFAULT));
        assert!(!entry.append_event(pending(EventKind::Kopiert, Some("offen")), AppendPolicy::DEFAULT));
        assert_eq!(entry.events.len(), 1);
    }

    #[test]
    fn dedupe_compares_snapshot_too() {
        let mut entry = AuditEntry::new("K1", None, None);
        assert!(entry.append_event(pending(EventKind::Kopiert, Some("offen")), AppendPolicy::DEFAULT));
        assert!(entry.append_event(pending(EventKind::Kopiert, Some("neu")), AppendPolicy::DEFAULT));
        assert!(entry.append_event(pending(EventKind::Kopiert, None), AppendPolicy::DEFAULT));
        assert_eq!(entry.events.len(), 3);
    }

    #[test]
    fn dedupe_only_looks_at_last_event() {
        let mut entry = AuditEntry::new("K1", None, None);
        entry.append_event(pending(EventKind::KiPruefung, Some("offen")), AppendPolicy::DEFAULT);
        entry.append_event(pending(EventKind::MenschPruefung, Some("offen")), AppendPolicy::DEFAULT);
        assert!(entry.append_event(pending(EventKind::KiPruefung, Some("offen")), AppendPolicy::DEFAULT));
        assert_eq!(entry.events.len(), 3);
    }

    #[test]
    fn force_bypasses_dedupe() {
        let mut entry = AuditEntry::new("K1", None, None);
        entry.append_event(pending(EventKind::Freigabe, None), AppendPolicy::DEFAULT);
        assert!(entry.append_event(pending(EventKind::Freigabe, None), AppendPolicy::FORCE));
        assert_eq!(entry.events.len(), 2);
    }

    #[test]
    fn append_refreshes_state_unless_told_not_to() {
        let mut entry = AuditEntry::new("K1", None, None);
        entry.append_event(pending(EventKind::Freigabe, None), AppendPolicy::DEFAULT);
        assert_eq!(entry.state, Zustand::Freigegeben);

        entry.append_event(pending(EventKind::Reset, None), AppendPolicy::KEEP_STATE);
        assert_eq!(entry.state, Zustand::Freigegeben);
        assert!(entry.refresh_state());
        assert_eq!(entry.state, Zustand::Synchronisiert);
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut entry = AuditEntry::new("K1", None, None);
        entry.append_event_at(pending(EventKind::Kopiert, None), AppendPolicy::DEFAULT, at(10));
        entry.append_event_at(pending(EventKind::KiPruefung, None), AppendPolicy::DEFAULT, at(5));
        assert_eq!(entry.events[1].ts, at(10));
        entry.append_event_at(pending(EventKind::Freigabe, None), AppendPolicy::DEFAULT, at(20));
        assert_eq!(entry.events[2].ts, at(20));
    }

    #[test]
    fn missing_prio_sorts_after_zero() {
        let low = AuditEntry::new("A", None, None);
        let zero = AuditEntry::new("B", None, Some(0));
        assert!(zero.sort_key() < low.sort_key());
    }
}

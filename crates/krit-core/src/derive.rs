//! Derivation of an entry's lifecycle state from its event log.
//!
//! The log is only ever scanned forward. A `reset` starts a new segment and
//! discards everything seen before it; the events stay in the log for audit
//! purposes but no longer contribute to the state.

use crate::entities::AuditEvent;
use crate::enums::{EventKind, Zustand};

/// Bookkeeping for the segment after the most recent `reset`.
#[derive(Debug, Default, Clone, Copy)]
struct Segment {
    last_final: Option<EventKind>,
    had_review: bool,
}

impl Segment {
    fn observe(&mut self, kind: EventKind) {
        match kind {
            EventKind::Reset => *self = Self::default(),
            EventKind::Freigabe | EventKind::Ablehnung => self.last_final = Some(kind),
            EventKind::KiPruefung | EventKind::MenschPruefung => self.had_review = true,
            EventKind::Kopiert | EventKind::Entfernt => {}
        }
    }

    const fn resolve(self) -> Zustand {
        match self.last_final {
            Some(EventKind::Freigabe) => Zustand::Freigegeben,
            Some(_) => Zustand::Abgelehnt,
            None if self.had_review => Zustand::Geprueft,
            None => Zustand::Synchronisiert,
        }
    }
}

/// Derive the current state from an event sequence.
///
/// A final decision in the current segment wins outright, regardless of
/// review events around it. Otherwise any review yields `geprueft`, and an
/// empty or review-free segment is `synchronisiert`.
#[must_use]
pub fn derive_zustand(events: &[AuditEvent]) -> Zustand {
    derive_from_kinds(events.iter().map(|event| event.kind))
}

/// Same as [`derive_zustand`] over bare event kinds.
#[must_use]
pub fn derive_from_kinds(kinds: impl IntoIterator<Item = EventKind>) -> Zustand {
    let mut segment = Segment::default();
    for kind in kinds {
        segment.observe(kind);
    }
    segment.resolve()
}

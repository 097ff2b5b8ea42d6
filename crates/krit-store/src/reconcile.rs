//! Reconciliation of a bidder's audit document against the criteria source.
//!
//! One run is three ordered passes over the in-memory document:
//!
//! 1. create or update an entry for every source criterion,
//! 2. soft-delete entries whose id is no longer in the source,
//! 3. re-sort (only if something changed) and refresh every cached state.
//!
//! All appends go through [`AuditEntry::append_event`], whose dedupe rule
//! keeps repeated runs against an unchanged source free of new events.

use std::collections::HashMap;

use krit_core::entities::{
    AppendPolicy, AuditDocument, AuditEntry, PendingEvent, STATUS_REMOVED, SourceCriteria,
    SourceCriterion,
};
use krit_core::enums::EventKind;
use krit_core::responses::SyncStats;
use serde_json::json;

/// What the update pass decided for a criterion that already has an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Unchanged,
    Update,
    Resurrect,
}

fn decide(entry: &AuditEntry, criterion: &SourceCriterion) -> Decision {
    if entry.status == criterion.status && entry.prio == criterion.prio {
        Decision::Unchanged
    } else if entry.is_removed() {
        Decision::Resurrect
    } else {
        Decision::Update
    }
}

/// Position of the first entry for every id.
fn index_by_id(document: &AuditDocument) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(document.entries.len());
    for (position, entry) in document.entries.iter().enumerate() {
        index.entry(entry.id.clone()).or_insert(position);
    }
    index
}

fn create_entry(criterion: &SourceCriterion, actor: &str) -> AuditEntry {
    let mut entry = AuditEntry::new(&criterion.id, criterion.status.clone(), criterion.prio);
    entry.append_event(
        PendingEvent::new(EventKind::Kopiert, actor)
            .with_source_status(criterion.status.as_deref()),
        AppendPolicy::DEFAULT,
    );
    entry
}

/// Overwrite drifted fields and record the re-copy.
///
/// A final decision is voided by a `reset` first. Resurrected entries always
/// get the `reset`, so old reviews from before the removal are not carried
/// into the revived entry.
fn apply_update(
    entry: &mut AuditEntry,
    criterion: &SourceCriterion,
    actor: &str,
    resurrect: bool,
) {
    if resurrect || entry.state.is_final() {
        entry.append_event(
            PendingEvent::new(EventKind::Reset, actor)
                .with_source_status(criterion.status.as_deref()),
            AppendPolicy::DEFAULT,
        );
    }

    let previous = json!({"status": entry.status, "prio": entry.prio});
    entry.status.clone_from(&criterion.status);
    entry.prio = criterion.prio;
    entry.append_event(
        PendingEvent::new(EventKind::Kopiert, actor)
            .with_source_status(criterion.status.as_deref())
            .with_result(Some(json!({"vorher": previous}))),
        AppendPolicy::FORCE,
    );
}

fn remove_entry(entry: &mut AuditEntry, actor: &str) {
    let previous = entry.status.replace(STATUS_REMOVED.to_string());
    entry.append_event(
        PendingEvent::new(EventKind::Entfernt, actor)
            .with_result(Some(json!({"vorher": {"status": previous}}))),
        AppendPolicy::KEEP_STATE,
    );
}

/// Sort if the run mutated the document, then refresh every cached state.
fn finish(document: &mut AuditDocument, stats: &mut SyncStats) {
    if stats.has_changes() {
        document.sort_entries();
    }
    let stale = document.refresh_states();
    if stale > 0 {
        tracing::debug!(stale, "corrected stale cached states");
    }
    stats.wrote_file = stats.has_changes() || stale > 0;
}

/// Bring `document` in line with `source`.
///
/// `actor` is recorded on every event this run appends.
pub fn reconcile_full(
    document: &mut AuditDocument,
    source: &SourceCriteria,
    actor: &str,
) -> SyncStats {
    let mut stats = SyncStats::default();
    let mut index = index_by_id(document);

    for criterion in source.values() {
        let Some(position) = index.get(&criterion.id).copied() else {
            tracing::debug!(id = %criterion.id, "new criterion");
            index.insert(criterion.id.clone(), document.entries.len());
            document.entries.push(create_entry(criterion, actor));
            stats.created += 1;
            continue;
        };

        let entry = &mut document.entries[position];
        let decision = decide(entry, criterion);
        tracing::debug!(id = %criterion.id, ?decision, "reconcile criterion");
        match decision {
            Decision::Unchanged => stats.unchanged += 1,
            Decision::Update | Decision::Resurrect => {
                apply_update(entry, criterion, actor, decision == Decision::Resurrect);
                stats.updated += 1;
            }
        }
    }

    for entry in &mut document.entries {
        if source.contains_key(&entry.id) {
            continue;
        }
        if entry.is_removed() {
            stats.unchanged += 1;
        } else {
            tracing::debug!(id = %entry.id, "criterion left the source; soft-deleting");
            remove_entry(entry, actor);
            stats.removed += 1;
        }
    }

    finish(document, &mut stats);
    stats
}

/// Add entries for source criteria the document does not know yet.
///
/// Existing entries are left alone and counted as unchanged.
pub fn reconcile_create(
    document: &mut AuditDocument,
    source: &SourceCriteria,
    actor: &str,
) -> SyncStats {
    let mut stats = SyncStats::default();
    let index = index_by_id(document);

    for criterion in source.values() {
        if index.contains_key(&criterion.id) {
            stats.unchanged += 1;
        } else {
            document.entries.push(create_entry(criterion, actor));
            stats.created += 1;
        }
    }

    finish(document, &mut stats);
    stats
}

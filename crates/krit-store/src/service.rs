//! Service layer orchestrating source loading, reconciliation and persistence.
//!
//! `AuditService` wraps a [`ProjectLayout`] and the actor defaults from
//! [`GeneralConfig`]. Every mutating call follows the same protocol:
//! 1. Resolve project and bidder
//! 2. Load (or initialize) the audit document
//! 3. Mutate in memory
//! 4. Persist atomically if anything changed

use krit_config::{GeneralConfig, KritConfig};
use krit_core::entities::{AppendPolicy, PendingEvent, SourceCriteria};
use krit_core::enums::EventKind;
use krit_core::responses::{
    AuditEventResponse, BidderSyncResult, BiddersResponse, EntrySummary, ListResponse,
    ShowResponse, StateCounts, SyncResponse, SyncTotals,
};
use serde_json::Value;

use crate::audit_file::{load_or_init_audit, write_audit_if_changed};
use crate::error::StoreError;
use crate::layout::{Project, ProjectLayout};
use crate::reconcile::reconcile_full;
use crate::source::load_kriterien_file;

/// A single reviewer or system action against one criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEventRequest {
    pub kind: EventKind,
    pub project: String,
    pub bidder: String,
    pub criterion_id: String,
    /// Falls back to `general.default_actor`.
    pub actor: Option<String>,
    pub result: Option<Value>,
    /// New reviewer assessment, left unchanged when `None`.
    pub assessment: Option<Value>,
    /// Append even if the last event has the same dedupe key.
    pub force_duplicate: bool,
}

impl AuditEventRequest {
    pub fn new(
        kind: EventKind,
        project: impl Into<String>,
        bidder: impl Into<String>,
        criterion_id: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            project: project.into(),
            bidder: bidder.into(),
            criterion_id: criterion_id.into(),
            actor: None,
            result: None,
            assessment: None,
            force_duplicate: false,
        }
    }
}

pub struct AuditService {
    layout: ProjectLayout,
    general: GeneralConfig,
}

impl AuditService {
    #[must_use]
    pub const fn new(layout: ProjectLayout, general: GeneralConfig) -> Self {
        Self { layout, general }
    }

    #[must_use]
    pub fn from_config(config: &KritConfig) -> Self {
        Self::new(ProjectLayout::new(&config.paths), config.general.clone())
    }

    #[must_use]
    pub const fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Reconcile one bidder, or every bidder of the project.
    ///
    /// In all-bidders mode a failing bidder is reported as
    /// [`BidderSyncResult::Failed`] and the remaining bidders still run.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProjectNotFound` or `StoreError::BidderNotFound`
    /// for unknown names, source errors for an unreadable criteria document,
    /// and any failure of the named bidder in single-bidder mode.
    pub fn sync(&self, project: &str, bidder: Option<&str>) -> Result<SyncResponse, StoreError> {
        let project = self.layout.require(project)?;
        let source = load_kriterien_file(&self.layout.criteria_path(&project))?;

        let results = match bidder {
            Some(bidder) => {
                self.layout.require_bidder(&project, bidder)?;
                vec![self.sync_bidder(&project, bidder, &source)?]
            }
            None => self
                .layout
                .list_bidders(&project)?
                .into_iter()
                .map(|bidder| {
                    self.sync_bidder(&project, &bidder, &source)
                        .unwrap_or_else(|error| {
                            tracing::error!(project = %project.name, %bidder, %error, "bidder sync failed");
                            BidderSyncResult::Failed {
                                bidder,
                                error: error.to_string(),
                            }
                        })
                })
                .collect(),
        };

        let mut totals = SyncTotals::default();
        let mut failed = 0;
        for result in &results {
            totals.add(result);
            failed += u32::from(result.is_failed());
        }

        Ok(SyncResponse {
            project: project.name,
            criteria: count(source.len()),
            bidders: results,
            totals,
            failed,
        })
    }

    fn sync_bidder(
        &self,
        project: &Project,
        bidder: &str,
        source: &SourceCriteria,
    ) -> Result<BidderSyncResult, StoreError> {
        let mut document = load_or_init_audit(&self.layout, project, bidder)?;
        let mut stats = reconcile_full(&mut document, source, &self.general.sync_actor);
        stats.wrote_file =
            write_audit_if_changed(&self.layout, project, bidder, &document, stats.wrote_file)?;

        tracing::info!(
            project = %project.name,
            bidder,
            created = stats.created,
            updated = stats.updated,
            removed = stats.removed,
            unchanged = stats.unchanged,
            wrote_file = stats.wrote_file,
            "bidder synced"
        );
        Ok(BidderSyncResult::synced(
            bidder,
            stats,
            count(document.entries.len()),
        ))
    }

    /// Append one event to an existing entry and persist if anything changed.
    ///
    /// The event's source status snapshot is the entry's current `status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` with `CoreError::NotFound` if the criterion
    /// has no entry, plus the lookup and I/O errors of [`Self::sync`].
    pub fn audit_event(&self, request: AuditEventRequest) -> Result<AuditEventResponse, StoreError> {
        let project = self.layout.require(&request.project)?;
        self.layout.require_bidder(&project, &request.bidder)?;
        let mut document = load_or_init_audit(&self.layout, &project, &request.bidder)?;

        let actor = request.actor.unwrap_or_else(|| self.general.default_actor.clone());
        let policy = if request.force_duplicate {
            AppendPolicy::FORCE
        } else {
            AppendPolicy::DEFAULT
        };

        let entry = document.require_entry_mut(&request.criterion_id)?;
        let event = PendingEvent::new(request.kind, actor)
            .with_source_status(entry.status.as_deref())
            .with_result(request.result);
        let appended = entry.append_event(event, policy);

        let assessed = match request.assessment {
            Some(assessment) if entry.assessment.as_ref() != Some(&assessment) => {
                entry.assessment = Some(assessment);
                true
            }
            _ => false,
        };
        let entry = entry.clone();

        if appended {
            tracing::info!(
                project = %project.name,
                bidder = %request.bidder,
                id = %entry.id,
                kind = %request.kind,
                state = entry.state.as_str(),
                "audit event appended"
            );
        } else {
            tracing::debug!(id = %entry.id, kind = %request.kind, "audit event deduplicated");
        }

        let wrote_file = write_audit_if_changed(
            &self.layout,
            &project,
            &request.bidder,
            &document,
            appended || assessed,
        )?;

        Ok(AuditEventResponse {
            skipped: !appended,
            wrote_file,
            entry,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::Core` with `CoreError::NotFound` for an unknown
    /// criterion, plus the lookup errors of [`Self::sync`].
    pub fn show(
        &self,
        project: &str,
        bidder: &str,
        criterion_id: &str,
    ) -> Result<ShowResponse, StoreError> {
        let project = self.layout.require(project)?;
        self.layout.require_bidder(&project, bidder)?;
        let document = load_or_init_audit(&self.layout, &project, bidder)?;
        let entry = document.require_entry(criterion_id)?.clone();

        Ok(ShowResponse {
            project: project.name,
            bidder: bidder.to_string(),
            entry,
        })
    }

    /// Summaries of every entry in document order, with per-state counts.
    ///
    /// # Errors
    ///
    /// Returns the lookup and I/O errors of [`Self::sync`].
    pub fn list(&self, project: &str, bidder: &str) -> Result<ListResponse, StoreError> {
        let project = self.layout.require(project)?;
        self.layout.require_bidder(&project, bidder)?;
        let document = load_or_init_audit(&self.layout, &project, bidder)?;

        let mut counts = StateCounts::default();
        let entries = document
            .entries
            .iter()
            .inspect(|entry| counts.record(entry))
            .map(EntrySummary::from)
            .collect();

        Ok(ListResponse {
            project: project.name,
            bidder: bidder.to_string(),
            entries,
            counts,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError::ProjectNotFound` or an I/O error.
    pub fn bidders(&self, project: &str) -> Result<BiddersResponse, StoreError> {
        let project = self.layout.require(project)?;
        let bidders = self.layout.list_bidders(&project)?;
        Ok(BiddersResponse {
            project: project.name,
            bidders,
        })
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

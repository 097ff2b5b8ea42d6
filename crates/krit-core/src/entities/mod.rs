//! Entity structs for criteria, audit events, entries and documents.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Field names
//! are renamed to the German keys used in persisted audit documents.

mod criterion;
mod document;
mod entry;
mod event;

pub use criterion::{SourceCriteria, SourceCriterion};
pub use document::{AUDIT_SCHEMA_VERSION, AuditDocument, AuditMeta};
pub use entry::{AppendPolicy, AuditEntry, STATUS_REMOVED};
pub use event::{AuditEvent, PendingEvent};

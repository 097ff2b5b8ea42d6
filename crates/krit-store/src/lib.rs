//! # krit-store
//!
//! Filesystem side of krit: locating projects and bidders, extracting the
//! authoritative criteria set, reconciling per-bidder audit documents and
//! persisting them atomically.
//!
//! The audit documents are plain JSON files next to the criteria document;
//! there is no database. [`service::AuditService`] is the entry point used by
//! the CLI.

pub mod audit_file;
pub mod error;
pub mod layout;
pub mod reconcile;
pub mod service;
pub mod source;

pub use error::StoreError;
pub use layout::{Project, ProjectLayout};
pub use service::{AuditEventRequest, AuditService};

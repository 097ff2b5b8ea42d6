//! Loading and atomic persistence of per-bidder audit documents.
//!
//! A missing or unparsable audit file is a valid empty starting point, since
//! the criteria document is the source of truth. Writes go through a temp
//! file in the target directory and an atomic rename, so readers never see a
//! half-written document.

use std::io::Write;
use std::path::Path;

use krit_core::entities::{AuditDocument, AuditMeta};
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::layout::{Project, ProjectLayout};

/// Load the audit document for (project, bidder), or start a fresh one.
///
/// # Errors
///
/// Returns `StoreError::Io` for read failures other than a missing file,
/// and `StoreError::Core` for an invalid bidder name.
pub fn load_or_init_audit(
    layout: &ProjectLayout,
    project: &Project,
    bidder: &str,
) -> Result<AuditDocument, StoreError> {
    let path = layout.audit_path(project, bidder)?;
    read_or_init(&path, AuditMeta::new(&project.name, bidder))
}

/// Persist `document` if `changed`. Returns whether a write happened.
///
/// # Errors
///
/// Returns `StoreError::Io` or `StoreError::Serialize` if the write fails.
/// A failed write is never reported as success.
pub fn write_audit_if_changed(
    layout: &ProjectLayout,
    project: &Project,
    bidder: &str,
    document: &AuditDocument,
    changed: bool,
) -> Result<bool, StoreError> {
    if !changed {
        return Ok(false);
    }
    let path = layout.audit_path(project, bidder)?;
    write_atomic(&path, document)?;
    tracing::info!(path = %path.display(), entries = document.entries.len(), "audit document written");
    Ok(true)
}

fn read_or_init(path: &Path, meta: AuditMeta) -> Result<AuditDocument, StoreError> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no audit document yet; starting empty");
            return Ok(AuditDocument::new(meta));
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    match serde_json::from_slice::<AuditDocument>(&raw) {
        Ok(document) => Ok(document),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "audit document is unparsable; re-initializing empty"
            );
            Ok(AuditDocument::new(meta))
        }
    }
}

fn write_atomic(path: &Path, document: &AuditDocument) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("audit path {} has no parent", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;

    let mut body = serde_json::to_vec_pretty(document)?;
    body.push(b'\n');

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    temp.write_all(&body)
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

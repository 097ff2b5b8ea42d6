//! Resolution of project, bidder, criteria and audit paths.
//!
//! ```text
//! {root}/{project}/kriterien.json
//! {root}/{project}/bieter/{bidder}/kriterien_audit.json
//! ```
//!
//! File and directory names come from `krit_config::PathsConfig`.

use std::path::{Path, PathBuf};

use krit_config::PathsConfig;
use krit_core::names::validate_name;

use crate::error::StoreError;

/// A resolved project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub path: PathBuf,
}

/// Maps project and bidder names onto the filesystem.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    criteria_file: String,
    bidders_dir: String,
    audit_file: String,
}

impl ProjectLayout {
    #[must_use]
    pub fn new(paths: &PathsConfig) -> Self {
        Self {
            root: PathBuf::from(&paths.projects_root),
            criteria_file: paths.criteria_file.clone(),
            bidders_dir: paths.bidders_dir.clone(),
            audit_file: paths.audit_file.clone(),
        }
    }

    /// Replace the projects root, keeping the file names.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Look up a project directory. `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if `name` is not a single path component.
    pub fn resolve(&self, name: &str) -> Result<Option<Project>, StoreError> {
        validate_name("project", name)?;
        let path = self.root.join(name);
        if !path.is_dir() {
            return Ok(None);
        }
        Ok(Some(Project {
            name: name.to_string(),
            path,
        }))
    }

    /// Like [`Self::resolve`], but a missing project is an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProjectNotFound` if the directory does not exist.
    pub fn require(&self, name: &str) -> Result<Project, StoreError> {
        self.resolve(name)?
            .ok_or_else(|| StoreError::ProjectNotFound(name.to_string()))
    }

    /// Bidder names of a project, sorted. A project without a bidders
    /// directory has no bidders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the bidders directory cannot be read.
    pub fn list_bidders(&self, project: &Project) -> Result<Vec<String>, StoreError> {
        let dir = self.bidders_path(project);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))?;
        let mut bidders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 bidder directory");
                continue;
            };
            if name.starts_with('.') || validate_name("bidder", &name).is_err() {
                continue;
            }
            bidders.push(name);
        }
        bidders.sort();
        Ok(bidders)
    }

    /// Check that `bidder` is one of the project's bidders.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BidderNotFound` if it is not, or
    /// `StoreError::Core` for an invalid name.
    pub fn require_bidder(&self, project: &Project, bidder: &str) -> Result<(), StoreError> {
        validate_name("bidder", bidder)?;
        if self.bidders_path(project).join(bidder).is_dir() {
            Ok(())
        } else {
            Err(StoreError::BidderNotFound {
                project: project.name.clone(),
                bidder: bidder.to_string(),
            })
        }
    }

    #[must_use]
    pub fn criteria_path(&self, project: &Project) -> PathBuf {
        project.path.join(&self.criteria_file)
    }

    #[must_use]
    pub fn bidders_path(&self, project: &Project) -> PathBuf {
        project.path.join(&self.bidders_dir)
    }

    /// Location of the audit document for (project, bidder).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Core` if `bidder` is not a single path component.
    pub fn audit_path(&self, project: &Project, bidder: &str) -> Result<PathBuf, StoreError> {
        validate_name("bidder", bidder)?;
        Ok(self
            .bidders_path(project)
            .join(bidder)
            .join(&self.audit_file))
    }
}

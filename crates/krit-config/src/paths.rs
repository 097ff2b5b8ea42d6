//! Filesystem layout of projects, bidders and audit documents.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_projects_root() -> String {
    ".".to_string()
}

fn default_criteria_file() -> String {
    "kriterien.json".to_string()
}

fn default_bidders_dir() -> String {
    "bieter".to_string()
}

fn default_audit_file() -> String {
    "kriterien_audit.json".to_string()
}

/// Layout: `{projects_root}/{project}/{criteria_file}` holds the criteria,
/// `{projects_root}/{project}/{bidders_dir}/{bidder}/{audit_file}` the audit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory containing one sub-directory per project.
    #[serde(default = "default_projects_root")]
    pub projects_root: String,

    /// File name of the criteria document inside a project directory.
    #[serde(default = "default_criteria_file")]
    pub criteria_file: String,

    /// Directory inside a project holding one sub-directory per bidder.
    #[serde(default = "default_bidders_dir")]
    pub bidders_dir: String,

    /// File name of the audit document inside a bidder directory.
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            projects_root: default_projects_root(),
            criteria_file: default_criteria_file(),
            bidders_dir: default_bidders_dir(),
            audit_file: default_audit_file(),
        }
    }
}

impl PathsConfig {
    /// Reject names that would escape or nest inside their parent directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects_root.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "paths.projects_root".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        for (field, value) in [
            ("paths.criteria_file", &self.criteria_file),
            ("paths.bidders_dir", &self.bidders_dir),
            ("paths.audit_file", &self.audit_file),
        ] {
            if let Some(reason) = single_component_problem(value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

fn single_component_problem(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("must not be empty".to_string());
    }
    if value.contains(['/', '\\']) {
        return Some(format!("'{value}' must be a plain name without separators"));
    }
    if value == "." || value == ".." {
        return Some(format!("'{value}' is not a usable name"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PathsConfig::default();
        assert_eq!(config.projects_root, ".");
        assert_eq!(config.criteria_file, "kriterien.json");
        assert_eq!(config.bidders_dir, "bieter");
        assert_eq!(config.audit_file, "kriterien_audit.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_audit_file_is_rejected() {
        let config = PathsConfig {
            audit_file: "audit/kriterien.json".to_string(),
            ..PathsConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("paths.audit_file"));
    }

    #[test]
    fn parent_dir_as_bidders_dir_is_rejected() {
        let config = PathsConfig {
            bidders_dir: "..".to_string(),
            ..PathsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

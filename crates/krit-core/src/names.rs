//! Validation of project and bidder names.
//!
//! Names are joined onto filesystem paths, so they must be exactly one
//! normal path component.

use std::path::{Component, Path};

use crate::errors::CoreError;

/// Check that `value` is usable as a single directory name.
///
/// # Errors
///
/// Returns `CoreError::Validation` for empty names, names containing path
/// separators, and the special components `.` and `..`.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed != value {
        return Err(CoreError::Validation(format!(
            "{field} '{value}' has leading or trailing whitespace"
        )));
    }

    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == value => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "{field} '{value}' must be a single path component"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_name;

    #[test]
    fn accepts_plain_names() {
        for name in ["Ausschreibung-2024", "Bieter A", "b_1", "x.y"] {
            assert!(validate_name("bidder", name).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_path_like_names() {
        for name in ["", " ", ".", "..", "a/b", "/abs", "../up", "a/", " pad"] {
            assert!(validate_name("bidder", name).is_err(), "{name:?}");
        }
    }

    #[test]
    fn error_names_the_field() {
        let err = validate_name("project", "..").unwrap_err();
        assert!(err.to_string().contains("project '..'"));
    }
}

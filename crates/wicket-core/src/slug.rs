//! Project slugs and filesystem-safe identifiers.

use crate::errors::CoreError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 50;

/// Derive a URL and directory friendly slug from a project title.
///
/// Lowercases, turns spaces into `-`, drops everything that is not
/// alphanumeric or `-`, and keeps the first [`MAX_SLUG_LEN`] characters.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .take(MAX_SLUG_LEN)
        .collect()
}

/// Check that `component` can be joined onto a directory without escaping it.
///
/// Accepts non-empty strings made of alphanumerics, `-`, and `_`.
///
/// # Errors
///
/// Returns [`CoreError::UnsafePathComponent`] for empty input or any other
/// character (path separators, dots, whitespace).
pub fn ensure_path_component(component: &str) -> Result<&str, CoreError> {
    let safe = !component.is_empty()
        && component
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if safe {
        Ok(component)
    } else {
        Err(CoreError::UnsafePathComponent(component.to_string()))
    }
}

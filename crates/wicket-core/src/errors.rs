//! Cross-cutting error types for Wicket.
//!
//! Domain-specific errors (e.g., `GatewayError`, `LakeError`) are defined in
//! their respective crates and converge in `wicket-analyst`.

use thiserror::Error;

/// Errors that can be raised by any Wicket crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A value cannot be used as a single path component (slug, table id).
    #[error("Unsafe path component: {0:?}")]
    UnsafePathComponent(String),

    /// Data failed validation (shape, range, format).
    #[error("Validation error: {0}")]
    Validation(String),
}

//! Error types for the coreos-cloudinit library.
//!
//! This module provides the error hierarchy for resolving and rendering
//! configuration trees, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a rendering error.
///
/// # Examples
///
/// ```
/// use coreos_cloudinit::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("#cloud-config\n".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the coreos-cloudinit library.
///
/// Every variant is fatal for the render call that produced it; non-fatal
/// findings travel as warning strings instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A validator rejected a field value.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A required field was absent or empty.
    #[error("missing required field '{field}'")]
    MissingField {
        /// The field that was missing.
        field: String,
    },

    /// A unit violated the content-or-dropin rule.
    #[error("invalid systemd unit '{name}': {reason}")]
    InvalidUnit {
        /// The unit name.
        name: String,
        /// The reason the unit is invalid.
        reason: String,
    },

    /// A write-file entry had an empty path or content.
    #[error("invalid write_file '{path}': {reason}")]
    InvalidWriteFile {
        /// The target path (may be empty).
        path: String,
        /// The reason the entry is invalid.
        reason: String,
    },

    /// A key in the configuration tree has no field descriptor.
    #[error("unknown field '{field}' in '{block}'")]
    UnknownField {
        /// The block the key was found in.
        block: String,
        /// The unrecognized key.
        field: String,
    },

    /// A value does not have the shape its descriptor declares.
    #[error("type mismatch for '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        /// The field with the mismatched value.
        field: String,
        /// The kind the descriptor declares.
        expected: String,
        /// A short description of what was supplied.
        found: String,
    },

    /// The configuration document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error is a structural error (missing field or broken entity).
    ///
    /// # Examples
    ///
    /// ```
    /// use coreos_cloudinit::Error;
    ///
    /// let err = Error::MissingField { field: "write_file[0].path".into() };
    /// assert!(err.is_structural());
    /// ```
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. } | Self::InvalidUnit { .. } | Self::InvalidWriteFile { .. }
        )
    }

    /// Check if error indicates the tree and the descriptors disagree.
    #[must_use]
    pub fn is_descriptor_mismatch(&self) -> bool {
        matches!(self, Self::UnknownField { .. } | Self::TypeMismatch { .. })
    }
}

/// A failed render: the fatal error plus every warning recorded before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RenderFailure {
    /// The error that stopped rendering.
    #[source]
    pub error: Error,
    /// Warnings accumulated up to the failure.
    pub warnings: Vec<String>,
}

//! Error handling for the image-map editor
//!
//! Every failure the designer can report while turning external input (JSON
//! records, HTML `<area>` tags) into areas is an [`AreaError`]. Errors are
//! raised before the registry is touched, so a rejected record never leaves a
//! half-built area behind.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Area construction and import error type.
#[derive(Error, Debug)]
pub enum AreaError {
    /// Coordinates parsed but fail the kind's minimum-validity predicate
    #[error("Invalid {kind} area: {reason}")]
    InvalidShape {
        /// The shape kind being built.
        kind: String,
        /// Why the coordinates were rejected.
        reason: String,
    },

    /// Wrong number of coordinates for the kind
    #[error("Malformed coordinates for {kind}: got {count} values")]
    MalformedCoordinates {
        /// The shape kind being built.
        kind: String,
        /// How many numbers were supplied.
        count: usize,
    },

    /// A coordinate token that is not a number
    #[error("Invalid coordinate value '{value}'")]
    InvalidNumber {
        /// The offending token.
        value: String,
    },

    /// No constructor exists for the requested kind
    #[error("Unknown shape kind '{kind}'")]
    UnknownShapeKind {
        /// The kind name as found in the input.
        kind: String,
    },

    /// A point was added to a polygon that is already closed
    #[error("Cannot add a point to a closed polygon")]
    PolygonClosed,

    /// The persisted document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AreaError {
    /// Build an [`AreaError::InvalidShape`].
    pub fn invalid_shape(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::InvalidShape {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Build an [`AreaError::UnknownShapeKind`].
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        AreaError::UnknownShapeKind { kind: kind.into() }
    }
}

/// Result type alias for area operations.
pub type AreaResult<T> = Result<T, AreaError>;

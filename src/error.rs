//! Error types
//!
//! Validation failures (bad imports, bad config) and precondition failures
//! (mutating before the surface size is known) are returned to the caller.
//! Recoloring an unknown entity is not an error.

use thiserror::Error;

/// Scene mutations that need state the scene does not have yet
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("surface dimensions are unknown; a resize must arrive before adding entities")]
    MissingDimensions,
}

/// Rejected scene import. The current scene is never touched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read scene: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entity with an empty id")]
    EmptyId,

    #[error("duplicate entity id {0:?}")]
    DuplicateId(String),

    #[error("entity {id:?} has non-positive size {width}x{height}")]
    NonPositiveSize { id: String, width: f64, height: f64 },

    #[error("entity {id:?} has a non-finite {field}")]
    NonFinite { id: String, field: &'static str },

    #[error("entity {id:?} has an empty color")]
    EmptyColor { id: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize scene: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write scene: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything an editor operation can report
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

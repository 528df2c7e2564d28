use thiserror::Error;

/// Errors surfaced by the transformation engine.
///
/// Registry and routing failures carry the offending format names. Failures
/// raised by an edge are passed through untouched as [`TransformError::Edge`].
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unknown format '{name}'")]
    UnknownFormat { name: String },

    #[error("format '{name}' is already registered")]
    DuplicateFormat { name: String },

    #[error("no transformation path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    #[error(transparent)]
    Edge(#[from] anyhow::Error),
}

impl TransformError {
    pub fn unknown_format<T: Into<String>>(name: T) -> Self {
        TransformError::UnknownFormat { name: name.into() }
    }

    pub fn duplicate_format<T: Into<String>>(name: T) -> Self {
        TransformError::DuplicateFormat { name: name.into() }
    }

    pub fn no_path<S: Into<String>, D: Into<String>>(from: S, to: D) -> Self {
        TransformError::NoPath {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Stable diagnostic code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            TransformError::UnknownFormat { .. } => "TRF-FMT-001",
            TransformError::DuplicateFormat { .. } => "TRF-FMT-002",
            TransformError::NoPath { .. } => "TRF-PATH-001",
            TransformError::Edge(_) => "TRF-EDGE-001",
        }
    }

    /// Returns the edge failure when this error originated inside an edge.
    pub fn edge_error(&self) -> Option<&anyhow::Error> {
        match self {
            TransformError::Edge(err) => Some(err),
            _ => None,
        }
    }
}

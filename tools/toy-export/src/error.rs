//! Export errors

use std::path::PathBuf;

use toy_format::FormatError;

/// Errors that abort an export run.
///
/// Only [`ExportError::EmptyDestinationPath`] is recoverable: it is detected
/// before any work starts. Everything else is terminal and no output file is
/// produced.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("empty destination path")]
    EmptyDestinationPath,

    #[error("mesh '{mesh}': face {face} has {corners} corners, expected a triangle")]
    MalformedFaceTopology {
        mesh: String,
        face: usize,
        corners: usize,
    },

    #[error("mesh '{mesh}': face corner {corner} has {found} color layers, expected {expected}")]
    LayerCountMismatch {
        mesh: String,
        corner: usize,
        found: usize,
        expected: usize,
    },

    /// Format preconditions, including the vertex budget and string lengths
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("host document: {0}")]
    Document(String),

    #[error("debug dump failed: {0}")]
    DebugDump(#[from] serde_json::Error),

    #[error("invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the vertex budget violation, wherever it was detected
    pub fn is_vertex_budget_exceeded(&self) -> bool {
        matches!(
            self,
            ExportError::Format(FormatError::VertexBudgetExceeded { .. })
        )
    }

    /// True for an over-long name or layer name
    pub fn is_string_too_long(&self) -> bool {
        matches!(self, ExportError::Format(FormatError::StringTooLong { .. }))
    }
}

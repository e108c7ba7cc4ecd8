//! Error types for mesh export.

use mesh_types::FragmentDefect;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while exporting fragments.
///
/// Both variants leave the destination untouched, so a failed export can be
/// retried as a whole.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A fragment violates its structural invariants.
    ///
    /// Retrying will not help; the input must be fixed.
    #[error("fragment {fragment} is malformed: {defect}")]
    MalformedFragment {
        /// Position of the fragment in iteration order.
        fragment: usize,
        /// What is wrong with it.
        #[source]
        defect: FragmentDefect,
    },

    /// The destination could not store the document.
    #[error("failed to write {destination}: {source}")]
    SinkWriteFailure {
        /// Human-readable description of the destination.
        destination: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Whether the input geometry was at fault.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedFragment { .. })
    }

    /// Whether the destination was at fault.
    #[must_use]
    pub const fn is_sink_failure(&self) -> bool {
        matches!(self, Self::SinkWriteFailure { .. })
    }

    /// Index of the offending fragment, for malformed input.
    #[must_use]
    pub const fn fragment_index(&self) -> Option<usize> {
        match self {
            Self::MalformedFragment { fragment, .. } => Some(*fragment),
            Self::SinkWriteFailure { .. } => None,
        }
    }
}

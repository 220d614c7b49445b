use thiserror::Error;

/// Convenience result type for extraction operations.
pub type ExtractionResult<T> = Result<T, ExtractionError>;

/// Error type returned by extraction functions.
///
/// This is a single error enum shared across JSON/XML/CSV sources and the broadcasting core.
/// Every variant is fatal to the extraction call that produced it: no partial dataset is returned.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The document could not be loaded into a value tree at all.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// The mapping cannot be resolved against the source layout.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Two columns iterate the same nesting depth with a different number of elements.
    ///
    /// Paths are reconstructed down to the offending axis (see
    /// [`crate::extraction::path::reconstruct_mismatch_path`]).
    #[error(
        "Incorrect JSON. Number of elements in {left_path} ({left_count}) and {right_path} ({right_count}) do not match."
    )]
    BroadcastMismatch {
        left_path: String,
        left_count: usize,
        right_path: String,
        right_count: usize,
    },
}

impl ExtractionError {
    /// Short stable tag for the variant, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::MalformedDocument { .. } => "malformed_document",
            Self::Configuration { .. } => "configuration",
            Self::BroadcastMismatch { .. } => "broadcast_mismatch",
        }
    }

    pub(crate) fn malformed(message: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            message: message.to_string(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

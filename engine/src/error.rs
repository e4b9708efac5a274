//! Error types for the twenty engine
//!
//! Game-level anomalies (unrecognized answers, short rows, unreadable cells,
//! unknown attributes, an empty dataset) never reach this type: they degrade
//! to default behavior where they occur. What remains are genuine I/O
//! failures and a player who stopped answering.

use thiserror::Error;

/// Top-level error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Dataset table error: {0}")]
    Csv(#[from] csv::Error),

    /// The answer source has no more input (e.g. stdin reached EOF).
    #[error("Input closed before an answer was given")]
    InputClosed,
}

impl EngineError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True when the session ended because nobody is answering anymore.
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Self::InputClosed)
    }
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

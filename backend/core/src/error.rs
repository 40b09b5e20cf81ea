use thiserror::Error;

/// Top-level error type for the SightSpeak pipeline.
///
/// Extraction ambiguity is deliberately absent here: the extractor reports it
/// through [`crate::types::CleanedText::Ambiguous`] and the pipeline keeps
/// going, so it never travels as an error.
#[derive(Debug, Error)]
pub enum SightSpeakError {
    /// The external inference process could not be started at all
    /// (missing executable, permission failure). Fatal to the run.
    #[error("failed to launch inference process: {0}")]
    Launch(#[source] std::io::Error),

    /// The inference process started but exited non-zero or produced no
    /// output. Terminates the current run; `stderr` carries whatever the
    /// tool reported before dying.
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String, stderr: String },

    /// A persona name not present in the registry. Usage error; fails fast
    /// with no partial work.
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// The speech engine failed to produce audio. Text stages already
    /// completed stand regardless.
    #[error("audio rendering failed: {0}")]
    AudioRender(String),

    /// The uploaded buffer is not a supported image.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Invalid invoker configuration (e.g. temperature out of range).
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

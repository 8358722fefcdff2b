use thiserror::Error;

/// Top-level error for every user-facing operation.
///
/// Each variant maps to exactly one failure the presentation layer can show
/// and the user can recover from by re-issuing the action. None of these
/// corrupt session state.
#[derive(Debug, Error)]
pub enum HeartMendError {
    #[error("unknown persona: {0}")]
    UnknownPersona(String),

    #[error("message is empty")]
    EmptyInput,

    #[error("invalid mood: {0}")]
    InvalidMood(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("chat dispatch failed: {0}")]
    DispatchFailed(#[from] DispatchError),

    #[error("transcript export failed: {0}")]
    ExportFailed(#[from] ExportError),
}

/// Why a call to the LLM service failed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Groq API key not set")]
    MissingApiKey,

    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("rate limited or quota exhausted: {0}")]
    Quota(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure in the document layout pass. Never raised for message content.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] printpdf::Error),
}

use std::io;

use thiserror::Error;

/// Why a question was refused at the admission boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("expected 4 options, found {0}")]
    OptionCount(usize),

    #[error("correct index {index} is outside 0..{options}")]
    CorrectIndexOutOfRange { index: i64, options: usize },

    #[error("option {0} is blank")]
    BlankOption(usize),

    #[error("question text is empty")]
    EmptyText,

    #[error("subject is empty")]
    EmptySubject,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not serialize state: {0}")]
    Serialize(String),

    #[error("Invalid export file: {0}")]
    Import(String),

    #[error("Export file rejected: {0}")]
    InvalidImport(String),
}

/// Coarse classification shown to the learner when generation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Authentication,
    RateLimited,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("The generation service rejected the API key. Check your credentials.")]
    Auth,

    #[error("Generation quota exhausted or rate limited. Wait a moment and retry.")]
    Quota,

    #[error("The model returned an empty response.")]
    EmptyResponse,

    #[error("The model response could not be understood: {0}")]
    Malformed(String),

    #[error("Network failure while contacting the generation service: {0}")]
    Network(String),

    #[error("Generation service failed with HTTP {status}")]
    Service { status: u16 },

    #[error("Question generation is unavailable: {0}")]
    Unavailable(String),

    #[error("A generation request is already in flight")]
    InFlight,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::Auth => FailureKind::Authentication,
            GenerationError::Quota => FailureKind::RateLimited,
            _ => FailureKind::Generic,
        }
    }
}

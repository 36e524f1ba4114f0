pub mod drill;
pub mod result;

pub use drill::{AnswerOutcome, SessionKind, SessionState};

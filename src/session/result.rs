use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::scoring;
use crate::session::drill::SessionState;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionResult {
    pub mode: String,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub accuracy: u32,
    pub elapsed_secs: f64,
    #[serde(default)]
    pub timed_out: bool,
    pub timestamp: DateTime<Utc>,
}

impl SessionResult {
    pub fn from_session(session: &SessionState) -> Self {
        let answered = session.answered_count();
        let correct = session.correct_count();
        Self {
            mode: session.kind.as_str().to_string(),
            total: session.questions.len(),
            answered,
            correct,
            accuracy: scoring::accuracy_percent(correct as u32, answered as u32),
            elapsed_secs: session.elapsed_secs(),
            timed_out: session.timed_out,
            timestamp: Utc::now(),
        }
    }
}

/// `m:ss` countdown label.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

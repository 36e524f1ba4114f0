pub mod admission;
pub mod gemini;
pub mod prompt;
pub mod worker;

use serde::Deserialize;

use crate::bank::question::Difficulty;
use crate::error::GenerationError;

pub const MIN_BATCH: u32 = 1;
pub const MAX_BATCH: u32 = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject: String,
    pub count: u32,
    pub difficulty: Difficulty,
    pub topic: Option<String>,
}

impl GenerationRequest {
    pub fn new(subject: &str, count: u32, difficulty: Difficulty, topic: Option<&str>) -> Self {
        Self {
            subject: subject.trim().to_string(),
            count: count.clamp(MIN_BATCH, MAX_BATCH),
            difficulty,
            topic: topic
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}

/// One item as the model returned it, before admission checks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "missing_index")]
    pub correct_index: i64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, alias = "adpiePhase", alias = "processPhase")]
    pub phase: Option<String>,
}

fn missing_index() -> i64 {
    -1
}

pub trait QuestionGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<RawQuestion>, GenerationError>;
}

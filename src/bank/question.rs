use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::QuestionError;

pub const OPTION_COUNT: usize = 4;

/// Stats bucket for questions that carry no nursing-process tag.
pub const UNCLASSIFIED_PHASE: &str = "Unclassified";

// --- Nursing process phase ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NursingPhase {
    Assessment,
    Diagnosis,
    Planning,
    Implementation,
    Evaluation,
}

impl NursingPhase {
    pub fn to_key(self) -> &'static str {
        match self {
            NursingPhase::Assessment => "Assessment",
            NursingPhase::Diagnosis => "Diagnosis",
            NursingPhase::Planning => "Planning",
            NursingPhase::Implementation => "Implementation",
            NursingPhase::Evaluation => "Evaluation",
        }
    }

    /// Lenient parse used for model output: ignores case and surrounding space.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::all()
            .iter()
            .copied()
            .find(|phase| phase.to_key().eq_ignore_ascii_case(key))
    }

    pub fn all() -> &'static [NursingPhase] {
        &[
            NursingPhase::Assessment,
            NursingPhase::Diagnosis,
            NursingPhase::Planning,
            NursingPhase::Implementation,
            NursingPhase::Evaluation,
        ]
    }
}

impl fmt::Display for NursingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

/// Bucket key used by the stats aggregator for an optional phase tag.
pub fn phase_key(phase: Option<NursingPhase>) -> &'static str {
    phase.map(NursingPhase::to_key).unwrap_or(UNCLASSIFIED_PHASE)
}

// --- Difficulty ---

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Difficulty {
    #[serde(alias = "Beginner")]
    #[value(alias = "beginner")]
    Easy,
    #[default]
    #[serde(alias = "Intermediate")]
    #[value(alias = "intermediate")]
    Moderate,
    #[serde(alias = "Expert")]
    #[value(alias = "expert")]
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LastResult {
    Correct,
    Incorrect,
}

impl LastResult {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            LastResult::Correct
        } else {
            LastResult::Incorrect
        }
    }
}

// --- Question ---

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub chapter: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
    pub subject: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(
        default,
        rename = "adpiePhase",
        alias = "phase",
        skip_serializing_if = "Option::is_none"
    )]
    pub phase: Option<NursingPhase>,
    #[serde(default)]
    pub practiced_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<LastResult>,
}

impl Question {
    pub fn phase_key(&self) -> &'static str {
        phase_key(self.phase)
    }

    pub fn is_practiced(&self) -> bool {
        self.practiced_count > 0
    }

    /// Copy of this question after one more attempt.
    pub fn with_attempt(&self, is_correct: bool) -> Self {
        Self {
            practiced_count: self.practiced_count.saturating_add(1),
            last_result: Some(LastResult::from_correct(is_correct)),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.subject.trim().is_empty() {
            return Err(QuestionError::EmptySubject);
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount(self.options.len()));
        }
        if let Some(blank) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::BlankOption(blank));
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index as i64,
                options: self.options.len(),
            });
        }
        Ok(())
    }
}

/// Collision-resistant identifier for questions admitted into the bank.
pub fn fresh_id() -> String {
    format!("gen-{}", Uuid::new_v4())
}

/// Older exports store numeric ids; normalize everything to strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
pub(crate) fn sample_question(id: &str, subject: &str, phase: Option<NursingPhase>) -> Question {
    Question {
        id: id.to_string(),
        chapter: subject.to_string(),
        text: format!("Scenario {id}: which action comes first?"),
        options: vec![
            "Check airway".to_string(),
            "Call family".to_string(),
            "Document".to_string(),
            "Wait".to_string(),
        ],
        correct_index: 0,
        explanation: "Airway first.".to_string(),
        subject: subject.to_string(),
        difficulty: Difficulty::Moderate,
        phase,
        practiced_count: 0,
        last_result: None,
    }
}

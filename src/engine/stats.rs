use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::scoring;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub correct: u32,
    pub total: u32,
}

impl Bucket {
    fn with_answer(self, is_correct: bool) -> Self {
        Self {
            correct: self.correct.saturating_add(u32::from(is_correct)),
            total: self.total.saturating_add(1),
        }
    }

    pub fn accuracy_percent(self) -> u32 {
        scoring::accuracy_percent(self.correct, self.total)
    }
}

/// Rolling learner aggregate. Counters are additive and never derived from
/// the live question set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_questions_answered: u32,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub mastery_points: u32,
    #[serde(default)]
    pub subject_performance: BTreeMap<String, Bucket>,
    #[serde(default, alias = "adpiePerformance")]
    pub phase_performance: BTreeMap<String, Bucket>,
}

impl UserStats {
    pub fn accuracy_percent(&self) -> u32 {
        scoring::accuracy_percent(self.correct_answers, self.total_questions_answered)
    }

    /// `correct <= total` everywhere. Bucket sums are not checked: histories
    /// written before phase tracking legitimately have fewer phase entries.
    pub fn is_consistent(&self) -> bool {
        self.correct_answers <= self.total_questions_answered
            && self
                .subject_performance
                .values()
                .chain(self.phase_performance.values())
                .all(|b| b.correct <= b.total)
    }
}

/// Next aggregate after one answer. `stats` is left untouched; buckets are
/// created under the literal `subject`/`phase` keys on first use. Counters
/// saturate at `u32::MAX`.
pub fn record_answer(stats: &UserStats, subject: &str, phase: &str, is_correct: bool) -> UserStats {
    let mut next = stats.clone();
    next.total_questions_answered = next.total_questions_answered.saturating_add(1);
    next.correct_answers = next.correct_answers.saturating_add(u32::from(is_correct));
    next.mastery_points = next
        .mastery_points
        .saturating_add(scoring::mastery_reward(is_correct));
    bump(&mut next.subject_performance, subject, is_correct);
    bump(&mut next.phase_performance, phase, is_correct);
    next
}

fn bump(buckets: &mut BTreeMap<String, Bucket>, key: &str, is_correct: bool) {
    let bucket = buckets.entry(key.to_string()).or_default();
    *bucket = bucket.with_answer(is_correct);
}

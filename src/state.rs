use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bank::question::{Question, fresh_id};
use crate::bank::seed::seed_questions;
use crate::engine::stats::{self, UserStats};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppView {
    #[default]
    Dashboard,
    SubjectBank,
    Practice,
    MockTest,
    Forge,
    Analytics,
    Settings,
}

/// Root aggregate. Every transition below returns a new value and leaves
/// `self` untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub view: AppView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_subject: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: AppView::Dashboard,
            current_subject: None,
            questions: seed_questions(),
            stats: UserStats::default(),
            dark_mode: false,
        }
    }
}

impl AppState {
    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions available to a session scoped to `subject`, or the whole bank.
    pub fn pool(&self, subject: Option<&str>) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| subject.is_none_or(|s| q.subject == s))
            .cloned()
            .collect()
    }

    pub fn set_view(&self, view: AppView, subject: Option<String>) -> Self {
        Self {
            view,
            current_subject: subject,
            ..self.clone()
        }
    }

    /// Unknown ids are ignored: a finished or abandoned session may still
    /// hold questions that were deleted since.
    pub fn record_answer(&self, question_id: &str, is_correct: bool) -> Self {
        let Some(index) = self.questions.iter().position(|q| q.id == question_id) else {
            return self.clone();
        };

        let question = &self.questions[index];
        let stats = stats::record_answer(
            &self.stats,
            &question.subject,
            question.phase_key(),
            is_correct,
        );
        let mut questions = self.questions.clone();
        questions[index] = question.with_attempt(is_correct);

        Self {
            questions,
            stats,
            ..self.clone()
        }
    }

    /// Prepends `batch`. Ids that are blank or already taken (by the bank or
    /// earlier in the batch) are re-issued so lookups stay unambiguous.
    pub fn add_questions(&self, batch: Vec<Question>) -> Self {
        let mut taken: HashSet<String> = self.questions.iter().map(|q| q.id.clone()).collect();
        let mut questions = Vec::with_capacity(batch.len() + self.questions.len());
        for mut q in batch {
            if q.id.trim().is_empty() || taken.contains(&q.id) {
                q.id = fresh_id();
            }
            taken.insert(q.id.clone());
            questions.push(q);
        }
        questions.extend(self.questions.iter().cloned());

        Self {
            questions,
            ..self.clone()
        }
    }

    /// Stats are additive counters and are not rolled back.
    pub fn delete_question(&self, id: &str) -> Self {
        Self {
            questions: self
                .questions
                .iter()
                .filter(|q| q.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn reset_all() -> Self {
        Self::default()
    }

    pub fn toggle_theme(&self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
            ..self.clone()
        }
    }

    /// Loaded documents may come from older versions with duplicated ids.
    pub fn with_unique_ids(self) -> Self {
        let mut seen = HashSet::new();
        let questions = self
            .questions
            .into_iter()
            .map(|mut q| {
                if q.id.trim().is_empty() || !seen.insert(q.id.clone()) {
                    q.id = fresh_id();
                    seen.insert(q.id.clone());
                }
                q
            })
            .collect();
        Self { questions, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::question::{LastResult, NursingPhase, UNCLASSIFIED_PHASE, sample_question};
    use crate::engine::stats::Bucket;

    fn state_with(n: usize) -> AppState {
        AppState {
            questions: (0..n)
                .map(|i| {
                    sample_question(
                        &format!("q{i}"),
                        "Pharmacology",
                        Some(NursingPhase::Assessment),
                    )
                })
                .collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn test_default_is_first_run() {
        let state = AppState::default();
        assert_eq!(state.view, AppView::Dashboard);
        assert_eq!(state.questions.len(), 2);
        assert_eq!(state.stats, UserStats::default());
        assert!(!state.dark_mode);
        assert_eq!(AppState::reset_all(), state);
    }

    #[test]
    fn test_set_view_only_touches_view_and_subject() {
        let state = state_with(3);
        let next = state.set_view(AppView::SubjectBank, Some("Pharmacology".to_string()));
        assert_eq!(next.view, AppView::SubjectBank);
        assert_eq!(next.current_subject.as_deref(), Some("Pharmacology"));
        assert_eq!(next.questions, state.questions);
        assert_eq!(state.view, AppView::Dashboard);
    }

    #[test]
    fn test_record_answer_updates_question_and_stats() {
        let state = state_with(3);
        let next = state.record_answer("q1", true);

        let q = next.find_question("q1").unwrap();
        assert_eq!(q.practiced_count, 1);
        assert_eq!(q.last_result, Some(LastResult::Correct));
        assert_eq!(next.stats.total_questions_answered, 1);
        assert_eq!(
            next.stats.phase_performance["Assessment"],
            Bucket { correct: 1, total: 1 }
        );

        // previous snapshot untouched
        assert_eq!(state.find_question("q1").unwrap().practiced_count, 0);
        assert_eq!(state.stats.total_questions_answered, 0);
    }

    #[test]
    fn test_record_answer_untagged_phase_goes_to_unclassified() {
        let state = AppState::default();
        let id = state.questions[0].id.clone();
        let next = state.record_answer(&id, false);
        assert_eq!(
            next.stats.phase_performance[UNCLASSIFIED_PHASE],
            Bucket { correct: 0, total: 1 }
        );
    }

    #[test]
    fn test_record_answer_unknown_id_is_noop() {
        let state = state_with(2);
        assert_eq!(state.record_answer("missing", true), state);
    }

    #[test]
    fn test_add_questions_prepends_and_keeps_stats() {
        let state = state_with(2).record_answer("q0", true);
        let batch = vec![sample_question("new", "Community Health", None)];
        let next = state.add_questions(batch);
        assert_eq!(next.questions.len(), 3);
        assert_eq!(next.questions[0].id, "new");
        assert_eq!(next.stats, state.stats);
    }

    #[test]
    fn test_add_questions_reissues_colliding_ids() {
        let state = state_with(2);
        let batch = vec![
            sample_question("q0", "Community Health", None),
            sample_question("dup", "Community Health", None),
            sample_question("dup", "Community Health", None),
            sample_question("", "Community Health", None),
        ];
        let next = state.add_questions(batch);
        let ids: HashSet<&str> = next.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), next.questions.len());
        assert_eq!(next.questions[1].id, "dup");
        assert!(next.find_question("q0").is_some());
    }

    #[test]
    fn test_delete_missing_id_leaves_bank_intact() {
        let state = state_with(5);
        let next = state.delete_question("nope");
        assert_eq!(next.questions.len(), 5);
    }

    #[test]
    fn test_delete_does_not_roll_back_stats() {
        let state = state_with(5).record_answer("q3", false);
        let next = state.delete_question("q3");
        assert_eq!(next.questions.len(), 4);
        assert!(next.find_question("q3").is_none());
        assert_eq!(next.stats.total_questions_answered, 1);
    }

    #[test]
    fn test_toggle_theme() {
        let state = state_with(1);
        let dark = state.toggle_theme();
        assert!(dark.dark_mode);
        assert!(!dark.toggle_theme().dark_mode);
        assert_eq!(dark.questions, state.questions);
    }

    #[test]
    fn test_pool_scopes_by_subject() {
        let state = state_with(3).add_questions(vec![sample_question(
            "c1",
            "Community Health",
            None,
        )]);
        assert_eq!(state.pool(None).len(), 4);
        assert_eq!(state.pool(Some("Community Health")).len(), 1);
        assert!(state.pool(Some("Psychiatric Nursing")).is_empty());
    }

    #[test]
    fn test_with_unique_ids() {
        let mut state = state_with(2);
        state.questions.push(sample_question("q0", "Pharmacology", None));
        let fixed = state.with_unique_ids();
        let ids: HashSet<&str> = fixed.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(fixed.questions[0].id, "q0");
    }

    #[test]
    fn test_reads_screaming_snake_view_names() {
        let json = r#"{"view": "MOCK_TEST", "questions": [], "darkMode": true}"#;
        let state: AppState = serde_json::from_str(json).unwrap();
        assert_eq!(state.view, AppView::MockTest);
        assert!(state.dark_mode);
        assert_eq!(state.stats, UserStats::default());
    }
}

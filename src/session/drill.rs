use std::time::{Duration, Instant};

use crate::bank::question::Question;
use crate::session::result::SessionResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    Drill,
    Mock,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Drill => "drill",
            SessionKind::Mock => "mock",
        }
    }

    /// Mock exams withhold the rationale until the session is over.
    pub fn shows_rationale(self) -> bool {
        matches!(self, SessionKind::Drill)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// One practice or mock run over a fixed sampled question list.
pub struct SessionState {
    pub kind: SessionKind,
    pub questions: Vec<Question>,
    pub cursor: usize,
    pub answers: Vec<Option<usize>>,
    pub started_at: Instant,
    pub deadline: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub timed_out: bool,
}

impl SessionState {
    pub fn new(kind: SessionKind, questions: Vec<Question>, time_limit: Option<Duration>) -> Self {
        Self::started_at(kind, questions, time_limit, Instant::now())
    }

    pub fn started_at(
        kind: SessionKind,
        questions: Vec<Question>,
        time_limit: Option<Duration>,
        now: Instant,
    ) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            kind,
            questions,
            cursor: 0,
            answers,
            started_at: now,
            deadline: time_limit.map(|limit| now + limit),
            finished_at: None,
            timed_out: false,
        }
    }

    /// No questions were available for this session.
    pub fn is_exhausted(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some() || self.is_exhausted()
    }

    pub fn current(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.cursor)
    }

    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.cursor).copied().flatten()
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.questions.len()
    }

    /// Lock in `option` for the current question. Each question takes one answer;
    /// re-answers and out-of-range options are ignored.
    pub fn answer(&mut self, option: usize) -> Option<AnswerOutcome> {
        let question = self.current()?;
        if option >= question.options.len() || self.current_answer().is_some() {
            return None;
        }
        let outcome = AnswerOutcome {
            question_id: question.id.clone(),
            selected: option,
            correct_index: question.correct_index,
            is_correct: option == question.correct_index,
        };
        self.answers[self.cursor] = Some(option);
        Some(outcome)
    }

    /// Advance; moving past the last question finishes the session.
    pub fn next(&mut self) {
        if self.is_finished() {
            return;
        }
        if self.is_last() {
            self.finish();
        } else {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        if !self.is_finished() && self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn finish(&mut self) {
        self.finish_at(Instant::now());
    }

    fn finish_at(&mut self, now: Instant) {
        if self.finished_at.is_none() {
            self.finished_at = Some(now);
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Ends the session once the countdown has run out. Returns true on expiry.
    pub fn check_timer(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline && self.finished_at.is_none() => {
                self.timed_out = true;
                self.finish_at(deadline);
                true
            }
            _ => false,
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_index))
            .count()
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at).as_secs_f64(),
            None => self.started_at.elapsed().as_secs_f64(),
        }
    }

    pub fn result(&self) -> SessionResult {
        SessionResult::from_session(self)
    }
}

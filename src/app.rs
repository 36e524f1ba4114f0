use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::bank::question::Question;
use crate::config::Config;
use crate::engine::analytics::{self, AnalyticsReport, DashboardSummary};
use crate::engine::sampler;
use crate::error::{GenerationError, StoreError};
use crate::generator::admission::AdmittedBatch;
use crate::generator::worker::PendingGeneration;
use crate::generator::{GenerationRequest, QuestionGenerator};
use crate::session::drill::{AnswerOutcome, SessionKind, SessionState};
use crate::state::{AppState, AppView};
use crate::store::JsonStore;
use crate::store::json_store::{read_import, write_export};

pub type Subscriber = Box<dyn FnMut(&AppState)>;

/// Sole owner of the AppState. Every mutation swaps in a new snapshot,
/// mirrors it to the store, then notifies subscribers.
pub struct App {
    pub config: Config,
    state: AppState,
    store: Option<JsonStore>,
    subscribers: Vec<Subscriber>,
    generation: Option<PendingGeneration>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = match JsonStore::with_base_dir(config.data_path()) {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("persistence disabled: {e}");
                None
            }
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Option<JsonStore>) -> Self {
        let state = match store {
            Some(ref s) => {
                if s.remove_stale_temp() {
                    log::warn!("discarded an interrupted save");
                }
                s.load_state()
            }
            None => AppState::default(),
        };

        Self {
            config,
            state,
            store,
            subscribers: Vec::new(),
            generation: None,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&AppState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn commit(&mut self, next: AppState) {
        self.state = next;
        self.persist();
        self.notify();
    }

    fn persist(&self) {
        if let Some(ref store) = self.store
            && let Err(e) = store.save_state(&self.state)
        {
            log::warn!("failed to save state: {e}");
        }
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    // --- Mutations ---

    pub fn set_view(&mut self, view: AppView, subject: Option<String>) {
        let next = self.state.set_view(view, subject);
        self.commit(next);
    }

    pub fn record_answer(&mut self, question_id: &str, is_correct: bool) {
        if self.state.find_question(question_id).is_none() {
            log::debug!("answer for unknown question {question_id} ignored");
            return;
        }
        let next = self.state.record_answer(question_id, is_correct);
        self.commit(next);
    }

    pub fn add_questions(&mut self, batch: Vec<Question>) {
        if batch.is_empty() {
            return;
        }
        let next = self.state.add_questions(batch);
        self.commit(next);
    }

    /// Returns false when no question had that id.
    pub fn delete_question(&mut self, id: &str) -> bool {
        if self.state.find_question(id).is_none() {
            return false;
        }
        let next = self.state.delete_question(id);
        self.commit(next);
        true
    }

    pub fn toggle_theme(&mut self) {
        let next = self.state.toggle_theme();
        self.commit(next);
    }

    /// Factory reset: empties the persistent slot and returns to first-run state.
    /// Callers are responsible for confirming with the learner first.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        if let Some(ref store) = self.store {
            store.clear()?;
        }
        self.state = AppState::reset_all();
        self.notify();
        log::info!("factory reset complete");
        Ok(())
    }

    /// Replace the whole state from an export document. On any failure the
    /// current state is left as it was.
    pub fn import_file(&mut self, path: &Path) -> Result<(), StoreError> {
        match read_import(path) {
            Ok(imported) => {
                log::info!(
                    "imported {} questions from {}",
                    imported.questions.len(),
                    path.display()
                );
                self.commit(imported);
                Ok(())
            }
            Err(e) => {
                log::warn!("import of {} rejected: {e}", path.display());
                Err(e)
            }
        }
    }

    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        write_export(&self.state, dir)
    }

    // --- Sessions ---

    /// Sample a fresh session. A drill may be scoped to one subject; a mock
    /// always draws from the whole bank and runs against the clock.
    pub fn start_session(&mut self, kind: SessionKind, subject: Option<&str>) -> SessionState {
        let (pool, size, limit) = match kind {
            SessionKind::Drill => (self.state.pool(subject), self.config.drill_size, None),
            SessionKind::Mock => (
                self.state.pool(None),
                self.config.mock_size,
                Some(self.config.mock_duration()),
            ),
        };
        let questions = sampler::sample(&pool, size, &mut self.rng);
        log::debug!(
            "{} session with {} of {} questions",
            kind.as_str(),
            questions.len(),
            pool.len()
        );
        SessionState::new(kind, questions, limit)
    }

    /// Answer the session's current question and record it immediately.
    pub fn answer(&mut self, session: &mut SessionState, option: usize) -> Option<AnswerOutcome> {
        let outcome = session.answer(option)?;
        self.record_answer(&outcome.question_id, outcome.is_correct);
        Some(outcome)
    }

    // --- Generation ---

    pub fn is_generating(&self) -> bool {
        self.generation.is_some()
    }

    /// Seconds the in-flight request has been running.
    pub fn generation_elapsed(&self) -> Option<f64> {
        self.generation.as_ref().map(PendingGeneration::elapsed_secs)
    }

    pub fn begin_generation(
        &mut self,
        generator: Arc<dyn QuestionGenerator>,
        request: GenerationRequest,
    ) -> Result<(), GenerationError> {
        if self.generation.is_some() {
            return Err(GenerationError::InFlight);
        }
        log::debug!("generation started for {}", request.subject);
        self.generation = Some(PendingGeneration::spawn(generator, request));
        Ok(())
    }

    /// `None` while idle or still waiting. The batch is not merged here: the
    /// learner reviews it first and commits the survivors via `add_questions`.
    pub fn poll_generation(&mut self) -> Option<Result<AdmittedBatch, GenerationError>> {
        let outcome = self.generation.as_ref()?.try_finish()?;
        if let Some(pending) = self.generation.take() {
            match &outcome {
                Ok(batch) => log::info!(
                    "generated {} questions for {} in {:.1}s ({} rejected)",
                    batch.questions.len(),
                    pending.request().subject,
                    pending.elapsed_secs(),
                    batch.rejected.len()
                ),
                Err(e) => log::warn!("generation failed ({:?}): {e}", e.kind()),
            }
        }
        Some(outcome)
    }

    // --- Read-only projections ---

    pub fn dashboard(&self) -> DashboardSummary {
        analytics::dashboard(&self.state.stats, &self.state.questions)
    }

    pub fn analytics(&self) -> AnalyticsReport {
        analytics::analytics(&self.state.stats)
    }
}

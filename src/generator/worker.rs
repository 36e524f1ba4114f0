use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Instant;

use crate::error::GenerationError;
use crate::generator::admission::{AdmittedBatch, admit_batch};
use crate::generator::{GenerationRequest, QuestionGenerator};

type Outcome = Result<AdmittedBatch, GenerationError>;

/// A generation request running on a worker thread. It cannot be cancelled;
/// dropping the handle just discards the eventual result.
pub struct PendingGeneration {
    request: GenerationRequest,
    started_at: Instant,
    rx: mpsc::Receiver<Outcome>,
}

impl PendingGeneration {
    pub fn spawn(generator: Arc<dyn QuestionGenerator>, request: GenerationRequest) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_request = request.clone();

        thread::spawn(move || {
            let outcome = generator
                .generate(&worker_request)
                .and_then(|raw| admit_batch(raw, &worker_request));
            let _ = tx.send(outcome);
        });

        Self {
            request,
            started_at: Instant::now(),
            rx,
        }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Non-blocking check; `None` while the worker is still running.
    pub fn try_finish(&self) -> Option<Outcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_lost())),
        }
    }

    pub fn wait(self) -> Outcome {
        self.rx.recv().unwrap_or_else(|_| Err(worker_lost()))
    }
}

fn worker_lost() -> GenerationError {
    GenerationError::Network("generation worker stopped unexpectedly".to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::bank::question::Difficulty;
    use crate::generator::RawQuestion;

    /// Generator that replays a canned reply.
    pub(crate) struct CannedGenerator {
        pub reply: Mutex<Option<Result<Vec<RawQuestion>, GenerationError>>>,
        pub delay: Duration,
    }

    impl CannedGenerator {
        pub(crate) fn new(reply: Result<Vec<RawQuestion>, GenerationError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                delay: Duration::ZERO,
            }
        }
    }

    impl QuestionGenerator for CannedGenerator {
        fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Vec<RawQuestion>, GenerationError> {
            thread::sleep(self.delay);
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(GenerationError::EmptyResponse))
        }
    }

    pub(crate) fn good_item(text: &str) -> RawQuestion {
        RawQuestion {
            chapter: None,
            text: text.to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 3,
            explanation: "because".to_string(),
            phase: Some("Evaluation".to_string()),
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("Psychiatric Nursing", 2, Difficulty::Moderate, None)
    }

    #[test]
    fn test_worker_delivers_admitted_batch() {
        let generator = Arc::new(CannedGenerator::new(Ok(vec![good_item("Q1"), good_item("Q2")])));
        let pending = PendingGeneration::spawn(generator, request());
        let batch = pending.wait().unwrap();
        assert_eq!(batch.questions.len(), 2);
        assert!(batch.questions.iter().all(|q| q.subject == "Psychiatric Nursing"));
    }

    #[test]
    fn test_worker_forwards_failure() {
        let generator = Arc::new(CannedGenerator::new(Err(GenerationError::Quota)));
        let pending = PendingGeneration::spawn(generator, request());
        assert_eq!(pending.wait().unwrap_err(), GenerationError::Quota);
    }

    #[test]
    fn test_try_finish_polls_until_done() {
        let mut generator = CannedGenerator::new(Ok(vec![good_item("Q1")]));
        generator.delay = Duration::from_millis(50);
        let pending = PendingGeneration::spawn(Arc::new(generator), request());
        assert!(pending.try_finish().is_none());

        let outcome = loop {
            if let Some(outcome) = pending.try_finish() {
                break outcome;
            }
            thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(outcome.unwrap().questions.len(), 1);
    }
}

use crate::bank::question::{NursingPhase, OPTION_COUNT, Question, fresh_id};
use crate::error::{GenerationError, QuestionError};
use crate::generator::{GenerationRequest, RawQuestion};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the item in the model's response.
    pub position: usize,
    pub reason: QuestionError,
}

#[derive(Clone, Debug, Default)]
pub struct AdmittedBatch {
    pub questions: Vec<Question>,
    pub rejected: Vec<Rejection>,
}

/// Map a raw item into the bank's shape. Every admitted question gets a fresh
/// id, the requested subject and difficulty, and a clean practice history.
pub fn admit_one(raw: RawQuestion, request: &GenerationRequest) -> Result<Question, QuestionError> {
    let mut options: Vec<String> = raw.options.iter().map(|o| o.trim().to_string()).collect();
    // tolerate padding past the fourth option
    while options.len() > OPTION_COUNT && options.last().is_some_and(|o| o.is_empty()) {
        options.pop();
    }

    let correct_index = usize::try_from(raw.correct_index)
        .ok()
        .filter(|&i| i < options.len())
        .ok_or(QuestionError::CorrectIndexOutOfRange {
            index: raw.correct_index,
            options: options.len(),
        })?;

    let chapter = raw
        .chapter
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| request.subject.clone());

    let question = Question {
        id: fresh_id(),
        chapter,
        text: raw.text.trim().to_string(),
        options,
        correct_index,
        explanation: raw.explanation.trim().to_string(),
        subject: request.subject.clone(),
        difficulty: request.difficulty,
        phase: raw.phase.as_deref().and_then(NursingPhase::from_key),
        practiced_count: 0,
        last_result: None,
    };
    question.validate()?;
    Ok(question)
}

pub fn admit(raw: Vec<RawQuestion>, request: &GenerationRequest) -> AdmittedBatch {
    let mut batch = AdmittedBatch::default();
    for (position, item) in raw.into_iter().enumerate() {
        match admit_one(item, request) {
            Ok(q) => batch.questions.push(q),
            Err(reason) => batch.rejected.push(Rejection { position, reason }),
        }
    }
    batch
}

/// Like [`admit`], but a batch with nothing usable is a generation failure.
pub fn admit_batch(
    raw: Vec<RawQuestion>,
    request: &GenerationRequest,
) -> Result<AdmittedBatch, GenerationError> {
    if raw.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    let total = raw.len();
    let batch = admit(raw, request);
    for rejection in &batch.rejected {
        log::warn!(
            "rejected generated item {}: {}",
            rejection.position,
            rejection.reason
        );
    }
    if batch.questions.is_empty() {
        return Err(GenerationError::Malformed(format!(
            "none of the {total} generated questions passed validation"
        )));
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::question::Difficulty;

    fn request() -> GenerationRequest {
        GenerationRequest::new("Pharmacology", 5, Difficulty::Hard, None)
    }

    fn raw(correct_index: i64) -> RawQuestion {
        RawQuestion {
            chapter: Some("Cardiac drugs".to_string()),
            text: " Which lab value is checked before giving digoxin? ".to_string(),
            options: vec![
                "Potassium".to_string(),
                "Sodium".to_string(),
                "Calcium".to_string(),
                "Glucose".to_string(),
            ],
            correct_index,
            explanation: "Hypokalemia potentiates toxicity.".to_string(),
            phase: Some("assessment".to_string()),
        }
    }

    #[test]
    fn test_admitted_question_shape() {
        let q = admit_one(raw(0), &request()).unwrap();
        assert!(q.id.starts_with("gen-"));
        assert_eq!(q.subject, "Pharmacology");
        assert_eq!(q.chapter, "Cardiac drugs");
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert_eq!(q.phase, Some(NursingPhase::Assessment));
        assert_eq!(q.practiced_count, 0);
        assert_eq!(q.text, "Which lab value is checked before giving digoxin?");
    }

    #[test]
    fn test_out_of_range_and_negative_index_rejected() {
        assert!(matches!(
            admit_one(raw(4), &request()),
            Err(QuestionError::CorrectIndexOutOfRange { index: 4, .. })
        ));
        assert!(matches!(
            admit_one(raw(-1), &request()),
            Err(QuestionError::CorrectIndexOutOfRange { index: -1, .. })
        ));
    }

    #[test]
    fn test_wrong_option_count_rejected() {
        let mut item = raw(0);
        item.options.truncate(3);
        assert_eq!(
            admit_one(item, &request()),
            Err(QuestionError::OptionCount(3))
        );
    }

    #[test]
    fn test_trailing_blank_options_repaired() {
        let mut item = raw(1);
        item.options.push("  ".to_string());
        let q = admit_one(item, &request()).unwrap();
        assert_eq!(q.options.len(), 4);
    }

    #[test]
    fn test_unknown_phase_and_missing_chapter() {
        let mut item = raw(2);
        item.phase = Some("Triage".to_string());
        item.chapter = None;
        let q = admit_one(item, &request()).unwrap();
        assert_eq!(q.phase, None);
        assert_eq!(q.chapter, "Pharmacology");
    }

    #[test]
    fn test_batch_keeps_good_items_and_reports_bad() {
        let batch = admit(vec![raw(0), raw(9), raw(3)], &request());
        assert_eq!(batch.questions.len(), 2);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].position, 1);
        assert_ne!(batch.questions[0].id, batch.questions[1].id);
    }

    #[test]
    fn test_admit_batch_failures() {
        assert_eq!(
            admit_batch(Vec::new(), &request()).unwrap_err(),
            GenerationError::EmptyResponse
        );
        assert!(matches!(
            admit_batch(vec![raw(7)], &request()),
            Err(GenerationError::Malformed(_))
        ));
    }
}

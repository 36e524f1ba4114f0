use crate::bank::question::Question;

const SEED_QUESTIONS: &str = include_str!("../../assets/seed_questions.json");

/// First-launch question bank. Seed items predate phase tagging.
pub fn seed_questions() -> Vec<Question> {
    parse_seed(SEED_QUESTIONS)
}

fn parse_seed(content: &str) -> Vec<Question> {
    let questions: Vec<Question> = match serde_json::from_str(content) {
        Ok(questions) => questions,
        Err(e) => {
            log::error!("embedded seed bank is unreadable, starting empty: {e}");
            Vec::new()
        }
    };
    questions
        .into_iter()
        .map(|q| Question {
            practiced_count: 0,
            last_result: None,
            ..q
        })
        .collect()
}

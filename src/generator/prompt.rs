use serde_json::{Value, json};

use crate::bank::question::NursingPhase;
use crate::generator::GenerationRequest;

pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "You write licensure-style nursing exam items for educators.\n\
         Write {count} multiple-choice questions for the subject \"{subject}\".\n\
         Difficulty: {difficulty}.\n",
        count = request.count,
        subject = request.subject,
        difficulty = request.difficulty,
    );
    if let Some(topic) = &request.topic {
        prompt.push_str(&format!("Concentrate on this clinical topic: {topic}.\n"));
    }
    prompt.push_str(
        "Return a JSON array. Each element has:\n\
         - \"chapter\": the subject name above\n\
         - \"text\": a clinical scenario ending in a question\n\
         - \"options\": exactly 4 answer strings\n\
         - \"correctIndex\": 0-based index of the single best answer\n\
         - \"explanation\": the clinical rationale for the answer and why the distractors fail\n\
         - \"phase\": the nursing process step tested, one of Assessment, Diagnosis, Planning, Implementation, Evaluation\n",
    );
    prompt
}

/// Structured-output schema sent with the request.
pub fn response_schema() -> Value {
    let phases: Vec<&str> = NursingPhase::all().iter().map(|p| p.to_key()).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "chapter": { "type": "STRING" },
                "text": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctIndex": { "type": "INTEGER" },
                "explanation": { "type": "STRING" },
                "phase": { "type": "STRING", "enum": phases }
            },
            "required": ["chapter", "text", "options", "correctIndex", "explanation", "phase"]
        }
    })
}

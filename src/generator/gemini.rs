use std::time::Duration;

use serde::Deserialize;

use crate::config::Config;
use crate::error::GenerationError;
use crate::generator::{GenerationRequest, QuestionGenerator, RawQuestion};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Remote question generator backed by the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    api_key: String,
    model: String,
    timeout: Duration,
    api_base: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            timeout,
            api_base: API_BASE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let api_key = config.api_key().ok_or_else(|| {
            GenerationError::Unavailable(format!(
                "set {} to your API key",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(
            api_key,
            config.generation_model.clone(),
            Duration::from_secs(config.generation_timeout_secs),
        ))
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl QuestionGenerator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<RawQuestion>, GenerationError> {
        log::info!(
            "requesting {} {} questions for {} from {}",
            request.count,
            request.difficulty,
            request.subject,
            self.model
        );
        let body = post_json(self, request_body(request))?;
        let response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        parse_items(&extract_text(response)?)
    }
}

fn request_body(request: &GenerationRequest) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "parts": [{ "text": super::prompt::build_prompt(request) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": super::prompt::response_schema(),
        }
    })
}

#[cfg(feature = "network")]
fn post_json(generator: &GeminiGenerator, body: serde_json::Value) -> Result<String, GenerationError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(generator.timeout)
        .build()
        .map_err(|e| GenerationError::Network(e.to_string()))?;
    let response = client
        .post(generator.endpoint())
        .header("x-goog-api-key", &generator.api_key)
        .json(&body)
        .send()
        .map_err(|e| {
            if e.is_timeout() {
                GenerationError::Network("request timed out".to_string())
            } else {
                GenerationError::Network(e.to_string())
            }
        })?;

    let status = response.status().as_u16();
    let text = response
        .text()
        .map_err(|e| GenerationError::Network(e.to_string()))?;
    if (200..300).contains(&status) {
        Ok(text)
    } else {
        Err(classify_status(status, &text))
    }
}

#[cfg(not(feature = "network"))]
fn post_json(
    _generator: &GeminiGenerator,
    _body: serde_json::Value,
) -> Result<String, GenerationError> {
    Err(GenerationError::Unavailable(
        "built without the network feature".to_string(),
    ))
}

/// Map a non-success HTTP reply to the failure classes shown to the learner.
pub fn classify_status(status: u16, body: &str) -> GenerationError {
    match status {
        401 | 403 => GenerationError::Auth,
        429 => GenerationError::Quota,
        _ if body.contains("API_KEY_INVALID") || body.contains("API key not valid") => {
            GenerationError::Auth
        }
        _ if body.contains("RESOURCE_EXHAUSTED") => GenerationError::Quota,
        _ => GenerationError::Service { status },
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

pub fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

/// Decode the model's JSON array, tolerating a markdown code fence around it.
pub fn parse_items(text: &str) -> Result<Vec<RawQuestion>, GenerationError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let items: Vec<RawQuestion> =
        serde_json::from_str(unfenced).map_err(|e| GenerationError::Malformed(e.to_string()))?;
    if items.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(items)
}

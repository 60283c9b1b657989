//! AI Gateway — experience rewriting and ATS keyword-gap analysis.
//!
//! All model calls go through a [`GenerativeBackend`]. Production uses [`gemini::GeminiClient`];
//! tests plug in a scripted backend. The credential is passed per call, so a key saved in
//! settings takes effect on the next request.

pub mod gemini;
pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::ai::prompts::{
    fill_template, ATS_PROMPT_TEMPLATE, ATS_SUGGESTIONS_DESCRIPTION, REWRITE_PROMPT_TEMPLATE,
};

/// The résumé text is cut to this many characters before it is sent for analysis.
pub const ATS_RESUME_CHAR_LIMIT: usize = 4000;
pub const ATS_JOB_DESCRIPTION_CHAR_LIMIT: usize = 2000;
/// The only suggestion returned when the analysis call fails.
pub const ATS_FALLBACK: &str = "Analysis failed. Check your API key.";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI credential is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam
// ────────────────────────────────────────────────────────────────────────────

/// A generative text model. Carried in [`AiGateway`] as `Arc<dyn GenerativeBackend>`.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Free-text completion.
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, AiError>;

    /// Completion constrained to JSON matching `schema`. Returns the raw text.
    async fn generate_json(
        &self,
        api_key: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, AiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AtsSuggestions {
    suggestions: Vec<String>,
}

#[derive(Clone)]
pub struct AiGateway {
    backend: Arc<dyn GenerativeBackend>,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Rewrites an experience description as plain-text `•` bullets.
    ///
    /// An empty model answer yields `description` unchanged. Transport and API errors
    /// propagate.
    pub async fn rewrite_experience(
        &self,
        api_key: Option<&str>,
        description: &str,
    ) -> Result<String, AiError> {
        let api_key = require_key(api_key)?;
        let prompt = fill_template(REWRITE_PROMPT_TEMPLATE, &[("description", description)]);

        let raw = match self.backend.generate_text(api_key, &prompt).await {
            Ok(text) => text,
            Err(AiError::EmptyContent) => String::new(),
            Err(e) => return Err(e),
        };

        let cleaned = clean_rewrite(&raw);
        if cleaned.is_empty() {
            info!("Rewrite returned no text, keeping original description");
            return Ok(description.to_string());
        }
        Ok(cleaned)
    }

    /// Suggests keywords the résumé is missing for a job description.
    ///
    /// Only a missing credential is an error. Any failure after that is logged and answered
    /// with the single [`ATS_FALLBACK`] suggestion.
    pub async fn analyze_ats(
        &self,
        api_key: Option<&str>,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Vec<String>, AiError> {
        let api_key = require_key(api_key)?;
        let resume_text = truncate_chars(resume_text, ATS_RESUME_CHAR_LIMIT);
        let job_description = truncate_chars(job_description, ATS_JOB_DESCRIPTION_CHAR_LIMIT);
        let prompt = fill_template(
            ATS_PROMPT_TEMPLATE,
            &[
                ("resume_text", resume_text.as_str()),
                ("job_description", job_description.as_str()),
            ],
        );

        match self.request_suggestions(api_key, &prompt).await {
            Ok(suggestions) => Ok(suggestions),
            Err(e) => {
                warn!("ATS analysis failed, returning fallback: {e}");
                Ok(vec![ATS_FALLBACK.to_string()])
            }
        }
    }

    async fn request_suggestions(&self, api_key: &str, prompt: &str) -> Result<Vec<String>, AiError> {
        let text = match self
            .backend
            .generate_json(api_key, prompt, &ats_response_schema())
            .await
        {
            Ok(text) => text,
            // An empty answer parses as no suggestions.
            Err(AiError::EmptyContent) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let parsed: AtsSuggestions = serde_json::from_str(strip_json_fences(&text))?;
        Ok(parsed.suggestions)
    }
}

fn require_key(api_key: Option<&str>) -> Result<&str, AiError> {
    api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(AiError::NotConfigured)
}

/// `{suggestions: string[]}`, required.
pub fn ats_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": ATS_SUGGESTIONS_DESCRIPTION
            }
        },
        "required": ["suggestions"]
    })
}

/// Removes `**` and turns line-leading `* ` bullets into `• `.
pub fn clean_rewrite(text: &str) -> String {
    text.replace("**", "")
        .lines()
        .map(|line| match line.strip_prefix("* ") {
            Some(rest) => format!("• {rest}"),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    stripped
        .trim_start()
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped.trim_start())
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

//! Gemini client — the only code in this service that talks to the Gemini REST API.
//!
//! Model: gemini-2.5-flash (hardcoded). One HTTP call per invocation; there is no retry or
//! backoff, failures go straight back to the gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::ai::{AiError, GenerativeBackend};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// The model used for every AI call.
pub const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

impl<'a> GenerateContentRequest<'a> {
    fn text(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: None,
        }
    }

    fn json(prompt: &'a str, schema: &'a Value) -> Self {
        Self {
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
            ..Self::text(prompt)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// All text parts of the first candidate, joined. `None` when there is no text part.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let mut texts = parts.iter().filter_map(|p| p.text.as_deref()).peekable();
        texts.peek()?;
        Some(texts.collect())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: &str) -> Result<Self, AiError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url)
    }

    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {status}: {message}");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        body.text().ok_or(AiError::EmptyContent)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, AiError> {
        self.generate_content(api_key, &GenerateContentRequest::text(prompt))
            .await
    }

    async fn generate_json(
        &self,
        api_key: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, AiError> {
        self.generate_content(api_key, &GenerateContentRequest::json(prompt, schema))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;

    use super::*;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Echoes the key, the model call and the request body back as candidate text.
    async fn echo(
        Path(call): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let text = json!({ "key": key, "call": call, "body": body }).to_string();
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }],
            "usageMetadata": { "promptTokenCount": 5, "candidatesTokenCount": 7 }
        }))
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let value = serde_json::to_value(GenerateContentRequest::text("hello")).unwrap();
        assert_eq!(value, json!({ "contents": [{ "parts": [{ "text": "hello" }] }] }));
    }

    #[test]
    fn test_json_request_carries_mime_type_and_schema() {
        let schema = json!({ "type": "OBJECT" });
        let value = serde_json::to_value(GenerateContentRequest::json("hi", &schema)).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let client = GeminiClient::new("http://localhost:9999/").unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_text_sends_key_header_and_returns_candidate_text() {
        let base = spawn_stub(Router::new().route("/v1beta/models/:call", post(echo))).await;
        let client = GeminiClient::new(&base).unwrap();

        let text = client.generate_text("secret-key", "Rewrite this").await.unwrap();
        let echoed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(echoed["key"], "secret-key");
        assert_eq!(echoed["call"], "gemini-2.5-flash:generateContent");
        assert_eq!(
            echoed["body"]["contents"][0]["parts"][0]["text"],
            "Rewrite this"
        );
        assert!(echoed["body"].get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn test_generate_json_sends_schema() {
        let base = spawn_stub(Router::new().route("/v1beta/models/:call", post(echo))).await;
        let client = GeminiClient::new(&base).unwrap();
        let schema = json!({ "type": "OBJECT", "required": ["suggestions"] });

        let text = client.generate_json("k", "Analyze", &schema).await.unwrap();
        let echoed: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(echoed["body"]["generationConfig"]["responseSchema"], schema);
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error_without_retry() {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route(
                "/v1beta/models/:call",
                post(|State(hits): State<Arc<AtomicUsize>>| async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(json!({ "error": { "code": 503, "message": "overloaded" } })),
                    )
                }),
            )
            .with_state(hits.clone());
        let base = spawn_stub(app).await;
        let client = GeminiClient::new(&base).unwrap();

        let err = client.generate_text("k", "p").await.unwrap_err();

        match err {
            AiError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_candidate_text_is_empty_content() {
        let app = Router::new().route(
            "/v1beta/models/:call",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = spawn_stub(app).await;
        let client = GeminiClient::new(&base).unwrap();

        let err = client.generate_text("k", "p").await.unwrap_err();
        assert!(matches!(err, AiError::EmptyContent));
    }

    #[test]
    fn test_response_text_joins_all_parts_of_first_candidate() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [
                    { "text": "{\"suggestions\": [\"Ku" },
                    { "inlineData": {} },
                    { "text": "bernetes\"]}" }
                ] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("{\"suggestions\": [\"Kubernetes\"]}"));

        let no_text: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }]
        }))
        .unwrap();
        assert_eq!(no_text.text(), None);
    }
}

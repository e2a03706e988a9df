//! Anthropic Messages API client backing `SuggestionService`.
//!
//! Retries 429 and 5xx responses with exponential backoff. Any other non-2xx
//! response fails immediately with the API's error message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::prompts::{
    BULLETS_PROMPT_TEMPLATE, IMPROVE_PROMPT_TEMPLATE, JSON_ONLY_SYSTEM, SUMMARY_SYSTEM,
};
use super::{BulletPoints, ImprovedContent, SuggestionError, SuggestionService};

const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct AiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    backoff_base: Duration,
}

impl AiClient {
    pub fn new(api_key: String, model: String, base_url: &str) -> Result<Self, SuggestionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            backoff_base: Duration::from_millis(1000),
        })
    }

    /// Overrides the first retry delay (doubles on each further attempt).
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one user turn and returns the first text block of the reply.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, SuggestionError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<SuggestionError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.backoff_base * (1 << (attempt - 1));
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "AI call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.endpoint)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SuggestionError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("AI API returned {status}: {message}");
                last_error = Some(SuggestionError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                    .map(|e| e.error.message)
                    .unwrap_or(raw);
                return Err(SuggestionError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;
            debug!(
                input_tokens = parsed.usage.input_tokens,
                output_tokens = parsed.usage.output_tokens,
                "AI call succeeded"
            );

            return parsed
                .text()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or(SuggestionError::EmptyContent);
        }

        Err(last_error.unwrap_or(SuggestionError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Like `complete`, but deserializes the reply as JSON.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, SuggestionError> {
        let text = self.complete(prompt, system).await?;
        Ok(serde_json::from_str(strip_json_fences(&text))?)
    }
}

#[async_trait]
impl SuggestionService for AiClient {
    async fn generate_bullet_points(
        &self,
        instruction: &str,
        source_text: &str,
    ) -> Result<BulletPoints, SuggestionError> {
        let prompt = BULLETS_PROMPT_TEMPLATE
            .replace("{instruction}", instruction)
            .replace("{source_text}", source_text);
        let mut result: BulletPoints = self.complete_json(&prompt, JSON_ONLY_SYSTEM).await?;

        result.bullets = result
            .bullets
            .into_iter()
            .map(|b| b.trim().trim_start_matches(['-', '•', '*']).trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();

        if result.bullets.is_empty() {
            return Err(SuggestionError::NoBullets);
        }
        Ok(result)
    }

    async fn improve_summary(&self, prompt_text: &str) -> Result<String, SuggestionError> {
        self.complete(prompt_text, SUMMARY_SYSTEM).await
    }

    async fn improve_content(
        &self,
        field_type: &str,
        content: &str,
    ) -> Result<ImprovedContent, SuggestionError> {
        let prompt = IMPROVE_PROMPT_TEMPLATE
            .replace("{field_type}", field_type)
            .replace("{content}", content);
        self.complete_json(&prompt, JSON_ONLY_SYSTEM).await
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences the model sometimes adds.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_suffix("```").map(str::trim).unwrap_or(rest)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn text_reply(text: &str) -> serde_json::Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    fn client_for(server: &MockServer) -> AiClient {
        AiClient::new("test-key".to_string(), DEFAULT_MODEL.to_string(), &server.uri())
            .unwrap()
            .with_backoff_base(Duration::from_millis(1))
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        assert_eq!(strip_json_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_generate_bullet_points_parses_fenced_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
                "```json\n{\"bullets\": [\"- Built a billing service\", \"Cut costs 20%\"]}\n```",
            )))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate_bullet_points("Write bullets", "I built billing")
            .await
            .unwrap();
        assert_eq!(result.bullets, vec!["Built a billing service", "Cut costs 20%"]);
    }

    #[tokio::test]
    async fn test_empty_bullet_list_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(text_reply("{\"bullets\": [\"  \"]}")),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).generate_bullet_points("x", "y").await;
        assert!(matches!(result, Err(SuggestionError::NoBullets)));
    }

    #[tokio::test]
    async fn test_retries_server_errors_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("A summary.")))
            .mount(&server)
            .await;

        let summary = client_for(&server).improve_summary("prompt").await.unwrap();
        assert_eq!(summary, "A summary.");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(3)
            .mount(&server)
            .await;

        let result = client_for(&server).improve_summary("prompt").await;
        assert!(matches!(result, Err(SuggestionError::Api { status: 429, .. })));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        match client_for(&server).improve_content("summary", "text").await {
            Err(SuggestionError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid x-api-key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_improve_content_deserializes_camel_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
                "{\"improvedContent\": \"Led migration of 40 services\"}",
            )))
            .mount(&server)
            .await;

        let improved = client_for(&server)
            .improve_content("achievement", "did migration")
            .await
            .unwrap();
        assert_eq!(improved.improved_content, "Led migration of 40 services");
    }
}

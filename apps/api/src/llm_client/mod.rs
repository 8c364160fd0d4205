/// LLM Client — the single point of entry for all Mistral chat-completion
/// calls in the Resume Analysis API.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// All completion requests MUST go through this module.
///
/// Model: mistral-small-latest (hardcoded — do not make configurable to
/// prevent drift). One attempt per call: a failed request aborts the analysis
/// stage that issued it, so there is intentionally no retry loop here.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all completion calls.
pub const MODEL: &str = "mistral-small-latest";
const TEMPERATURE: f32 = 0.3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ModelCallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("completion contained no choices")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// The single completion client shared by all analysis stages.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_timeout(api_key, api_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(api_key: String, api_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            api_url,
        }
    }

    /// Sends a single chat-completion request and returns the text content of
    /// the first choice. The system instruction is fixed (see `prompts`);
    /// callers control the user prompt and the output token budget.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ModelCallError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::ANALYSIS_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelCallError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(ModelCallError::EmptyReply)?;

        debug!(reply_chars = choice.message.content.len(), "completion received");

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_reply(content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(
            "test-key".to_string(),
            format!("{}/v1/chat/completions", server.uri()),
        )
    }

    #[tokio::test]
    async fn complete_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": MODEL,
                "max_tokens": 1500,
                "temperature": 0.3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("{\"ok\": true}")))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .complete("analyze this", 1500)
            .await
            .unwrap();
        assert_eq!(reply, "{\"ok\": true}");
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_api_error_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .expect(1) // exactly one request — no retry loop
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("analyze this", 1200)
            .await
            .unwrap_err();
        match err {
            ModelCallError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_envelope_is_an_envelope_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("analyze this", 1500)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelCallError::Envelope(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_an_empty_reply_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .complete("analyze this", 1500)
            .await
            .unwrap_err();
        assert!(matches!(err, ModelCallError::EmptyReply));
    }

    #[tokio::test]
    async fn slow_provider_times_out_as_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_reply("{}"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = LlmClient::with_timeout(
            "test-key".to_string(),
            format!("{}/v1/chat/completions", server.uri()),
            Duration::from_millis(50),
        );
        let err = client.complete("analyze this", 1500).await.unwrap_err();
        assert!(matches!(err, ModelCallError::Http(_)));
    }
}

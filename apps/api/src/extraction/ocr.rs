//! OCR — converts a stored document URL into per-page markdown via the
//! hosted Mistral OCR endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::extraction::ExtractionError;

/// The OCR model used for all document conversions.
pub const OCR_MODEL: &str = "mistral-ocr-latest";
const OCR_TIMEOUT: Duration = Duration::from_secs(30);

/// One OCR'd page. Pages arrive in document order; `markdown` may be empty
/// for pages with no recognizable text.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrPage {
    #[serde(default)]
    pub markdown: String,
}

/// Hosted OCR collaborator. Held in `AppState` as `Arc<dyn OcrProvider>`.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Submits a retrievable document URL and returns the ordered pages.
    async fn process(&self, document_url: &str) -> Result<Vec<OcrPage>, ExtractionError>;
}

#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    model: &'a str,
    document: OcrDocument<'a>,
    include_image_base64: bool,
}

#[derive(Debug, Serialize)]
struct OcrDocument<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    document_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    pages: Vec<OcrPage>,
}

pub struct MistralOcr {
    http: Client,
    api_url: String,
    api_key: String,
}

impl MistralOcr {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::builder()
                .timeout(OCR_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_url: config.mistral_ocr_url.clone(),
            api_key: config.mistral_api_key.clone(),
        }
    }
}

#[async_trait]
impl OcrProvider for MistralOcr {
    async fn process(&self, document_url: &str) -> Result<Vec<OcrPage>, ExtractionError> {
        let request_body = OcrRequest {
            model: OCR_MODEL,
            document: OcrDocument {
                kind: "document_url",
                document_url,
            },
            // Page images are never read — only the markdown fragments.
            include_image_base64: false,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ExtractionError::Ocr(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Ocr(format!(
                "OCR request rejected with status {status}"
            )));
        }

        let parsed: OcrResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Ocr(format!("unreadable OCR response: {e}")))?;

        debug!(pages = parsed.pages.len(), "OCR completed");

        Ok(parsed.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ocr_for(server: &MockServer) -> MistralOcr {
        MistralOcr {
            http: Client::new(),
            api_url: format!("{}/v1/ocr", server.uri()),
            api_key: "test-key".to_string(),
        }
    }

    #[tokio::test]
    async fn process_returns_pages_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/ocr"))
            .and(body_partial_json(json!({
                "model": OCR_MODEL,
                "document": { "type": "document_url" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pages": [
                    { "index": 0, "markdown": "# Page one" },
                    { "index": 1, "markdown": "Page two" }
                ]
            })))
            .mount(&server)
            .await;

        let pages = ocr_for(&server)
            .process("https://cdn.test/resume.pdf")
            .await
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].markdown, "# Page one");
        assert_eq!(pages[1].markdown, "Page two");
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_ocr_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = ocr_for(&server)
            .process("https://cdn.test/resume.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Ocr(_)));
    }

    #[tokio::test]
    async fn page_without_markdown_deserializes_as_empty() {
        let page: OcrPage = serde_json::from_value(json!({ "index": 3 })).unwrap();
        assert!(page.markdown.is_empty());
    }
}

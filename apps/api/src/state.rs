use std::sync::Arc;

use crate::extraction::{BlobStore, OcrProvider};
use crate::llm_client::LlmClient;

/// Shared application state injected into route handlers via Axum extractors.
/// Everything here is immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Blob store the OCR service fetches uploaded documents from.
    pub store: Arc<dyn BlobStore>,
    pub ocr: Arc<dyn OcrProvider>,
}

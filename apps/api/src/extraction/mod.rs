//! Text extraction — stages the uploaded résumé to a temp file, uploads it to
//! blob storage, runs hosted OCR on the resulting URL, and concatenates the
//! per-page markdown into one plain-text document.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub mod ocr;
pub mod storage;

pub use ocr::OcrProvider;
pub use storage::BlobStore;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to stage document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document storage error: {0}")]
    Storage(String),

    #[error("OCR service error: {0}")]
    Ocr(String),

    #[error("no text could be extracted from the document")]
    EmptyText,
}

/// Converts an uploaded document into plain text.
///
/// The bytes are staged to a named temp file for the duration of the call;
/// the `NamedTempFile` guard removes it on every exit path, including storage
/// and OCR failures. Page fragments are joined in order with `\n` and the
/// result is trimmed; an empty result is a terminal error.
pub async fn extract_text(
    document: &[u8],
    filename: &str,
    store: &dyn BlobStore,
    ocr: &dyn OcrProvider,
) -> Result<String, ExtractionError> {
    let staged = tempfile::Builder::new()
        .prefix("resume_")
        .suffix(&suffix_for(filename))
        .tempfile()?;
    tokio::fs::write(staged.path(), document).await?;
    debug!(bytes = document.len(), "staged document for upload");

    let public_id = format!("resumes/resume_{}", Uuid::new_v4().simple());
    let url = store.upload(staged.path(), &public_id).await?;

    let pages = ocr.process(&url).await?;

    let text = pages
        .iter()
        .map(|page| page.markdown.as_str())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    let text = text.trim();

    if text.is_empty() {
        return Err(ExtractionError::EmptyText);
    }

    info!(pages = pages.len(), chars = text.len(), "text extracted");

    Ok(text.to_string())
}

fn suffix_for(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| ".pdf".to_string())
}

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::info;

use crate::analysis::analyzer::analyze;
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::state::AppState;

/// POST /analyze-resume
///
/// Multipart form: file field `resume` (PDF), text field `job_description`.
/// Validation failures are 400s with the messages clients key off; a failed
/// model call is a 500 with `success: false`. Request content is never
/// logged — only sizes and stage progress.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable resume upload: {e}")))?;
                resume = Some((filename, data));
            }
            "job_description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable job description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let (filename, data) =
        resume.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("No job description provided".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::Validation("No resume file selected".to_string()));
    }
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    info!(
        resume_bytes = data.len(),
        job_description_chars = job_description.len(),
        "analysis request accepted"
    );

    let resume_text =
        extract_text(&data, &filename, state.store.as_ref(), state.ocr.as_ref()).await?;

    let report = analyze(&state.llm, &resume_text, &job_description).await?;

    Ok(Json(json!({ "success": true, "data": report })))
}

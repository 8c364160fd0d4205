//! Analysis orchestrator — runs the four analysis stages for one request.
//!
//! Flow per stage: render prompt → complete → normalize. Stages execute
//! strictly sequentially (match → insights → flashcards → ats) and share no
//! data with each other. The first failed model call aborts the whole
//! request; unparseable replies degrade to per-stage fallbacks instead.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::normalize::normalize;
use crate::analysis::prompts;
use crate::analysis::report::ReportKind;
use crate::llm_client::{LlmClient, ModelCallError};

/// The assembled response envelope body. Built once per request, returned,
/// then discarded — nothing here outlives the request.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub analysis: Value,
    pub insights: Value,
    pub flashcards: Value,
    pub ats_score: Value,
    pub resume_preview: String,
}

/// Runs all four analysis stages and assembles the report.
///
/// All-or-nothing: a `ModelCallError` from any stage propagates immediately
/// and no partial report is ever returned.
pub async fn analyze(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<AnalysisReport, ModelCallError> {
    let analysis = run_stage(llm, ReportKind::Match, resume_text, job_description).await?;
    let insights = run_stage(llm, ReportKind::Insights, resume_text, job_description).await?;
    let flashcards = run_stage(llm, ReportKind::Flashcards, resume_text, job_description).await?;
    let ats_score = run_stage(llm, ReportKind::Ats, resume_text, job_description).await?;

    Ok(AnalysisReport {
        analysis,
        insights,
        flashcards,
        ats_score,
        resume_preview: resume_text.to_string(),
    })
}

async fn run_stage(
    llm: &LlmClient,
    kind: ReportKind,
    resume_text: &str,
    job_description: &str,
) -> Result<Value, ModelCallError> {
    let prompt = prompts::render(kind, resume_text, job_description);
    let reply = llm.complete(&prompt, kind.max_tokens()).await?;
    info!(stage = kind.name(), reply_chars = reply.len(), "analysis stage completed");
    Ok(normalize(&reply, kind))
}

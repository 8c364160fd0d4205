//! Report kinds — the four analysis stages, each with a fixed output-token
//! budget, an expected top-level JSON shape, and a fallback value of that
//! same shape for unparseable model replies.

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Match,
    Insights,
    Flashcards,
    Ats,
}

impl ReportKind {
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Match => "match",
            ReportKind::Insights => "insights",
            ReportKind::Flashcards => "flashcards",
            ReportKind::Ats => "ats",
        }
    }

    /// Output token budget for this stage's completion call.
    pub fn max_tokens(self) -> u32 {
        match self {
            ReportKind::Match => 1500,
            ReportKind::Insights => 1200,
            ReportKind::Flashcards => 2000,
            ReportKind::Ats => 1500,
        }
    }

    /// Flashcards are a JSON array; every other report is a JSON object.
    pub fn expects_array(self) -> bool {
        matches!(self, ReportKind::Flashcards)
    }

    /// The fixed degraded value returned when the model reply cannot be
    /// parsed into this kind's shape. Same top-level shape as the parsed
    /// path, so consumers never branch on which path produced the value.
    pub fn fallback(self) -> Value {
        match self {
            ReportKind::Match => json!({
                "matching_skills": [],
                "missing_skills": [],
                "matching_keywords": [],
                "missing_keywords": [],
                "experience_match": { "match_percentage": 0 },
                "education_match": { "match": false },
                "role_compatibility": { "score": 0, "reasoning": "Analysis failed to parse" }
            }),
            ReportKind::Insights => json!({
                "strengths": [],
                "weaknesses": [],
                "recommendations": [],
                "career_progression": { "gap_analysis": "Unable to analyze" },
                "resume_improvements": []
            }),
            ReportKind::Flashcards => json!([
                {
                    "question": "Tell me about yourself",
                    "answer": "Prepare based on your resume highlights",
                    "category": "Behavioral",
                    "difficulty": "Easy"
                }
            ]),
            ReportKind::Ats => json!({
                "overall_score": 0,
                "score_breakdown": {},
                "improvement_suggestions": [],
                "ats_compatibility": { "rating": "Unable to analyze" }
            }),
        }
    }
}

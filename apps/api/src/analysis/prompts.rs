// All prompt templates for the analysis pipeline. The shared system
// instruction lives in `llm_client::prompts`; these are the per-stage user
// prompts. Replace `{resume_text}` and `{job_description}` before sending.
//
// Inputs are interpolated verbatim — no escaping or content validation. That
// is a known injection surface inherited from the product contract.

use crate::analysis::report::ReportKind;

const MATCH_PROMPT_TEMPLATE: &str = r#"You are an expert HR analyst and ATS system. Analyze the following resume against the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide a detailed analysis in the following JSON format:
{
    "matching_skills": ["skill1", "skill2"],
    "missing_skills": ["skill1", "skill2"],
    "matching_keywords": ["keyword1", "keyword2"],
    "missing_keywords": ["keyword1", "keyword2"],
    "experience_match": {
        "required_years": "X years",
        "candidate_years": "Y years",
        "match_percentage": 85
    },
    "education_match": {
        "required": "Degree requirement",
        "candidate": "Candidate degree",
        "match": true
    },
    "role_compatibility": {
        "score": 78,
        "reasoning": "Detailed explanation of compatibility"
    }
}

Be precise and only return valid JSON."#;

const INSIGHTS_PROMPT_TEMPLATE: &str = r#"As a career counselor and resume expert, provide actionable insights for improving this resume for the target job.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide insights in this JSON format:
{
    "strengths": ["strength1", "strength2"],
    "weaknesses": ["weakness1", "weakness2"],
    "recommendations": [
        {
            "category": "Skills",
            "suggestion": "Specific actionable advice",
            "priority": "High/Medium/Low"
        }
    ],
    "career_progression": {
        "current_level": "Junior/Mid/Senior",
        "target_level": "Level for this role",
        "gap_analysis": "What's needed to bridge the gap"
    },
    "resume_improvements": [
        "Specific resume writing suggestions"
    ]
}

Return only valid JSON."#;

const FLASHCARDS_PROMPT_TEMPLATE: &str = r#"Create interview preparation flashcards based on the resume and job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Generate 15-20 flashcards in this JSON format:
[
    {
        "question": "Technical/behavioral question",
        "answer": "Detailed answer based on resume experience",
        "category": "Technical/Behavioral/Situational",
        "difficulty": "Easy/Medium/Hard"
    }
]

Focus on:
- Technical skills mentioned in the resume
- Behavioral questions based on job requirements
- Situational questions for the specific role
- Questions about projects/experience from the resume

Return only valid JSON array."#;

const ATS_PROMPT_TEMPLATE: &str = r#"You are an ATS (Applicant Tracking System) analyzer. Calculate a comprehensive ATS score for this resume.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Provide ATS analysis in this JSON format:
{
    "overall_score": 85,
    "score_breakdown": {
        "keyword_match": {
            "score": 75,
            "max_score": 100,
            "details": "X% of required keywords found"
        },
        "skills_match": {
            "score": 80,
            "max_score": 100,
            "details": "Technical and soft skills alignment"
        },
        "experience_relevance": {
            "score": 90,
            "max_score": 100,
            "details": "Experience relevance to role"
        },
        "format_optimization": {
            "score": 85,
            "max_score": 100,
            "details": "ATS-friendly formatting"
        }
    },
    "improvement_suggestions": [
        {
            "area": "Keywords",
            "suggestion": "Add these specific keywords",
            "impact": "High/Medium/Low"
        }
    ],
    "ats_compatibility": {
        "rating": "Excellent/Good/Fair/Poor",
        "key_issues": ["issue1", "issue2"],
        "optimization_tips": ["tip1", "tip2"]
    }
}

Return only valid JSON."#;

/// Renders the prompt for one analysis stage. Pure and deterministic.
pub fn render(kind: ReportKind, resume_text: &str, job_description: &str) -> String {
    let template = match kind {
        ReportKind::Match => MATCH_PROMPT_TEMPLATE,
        ReportKind::Insights => INSIGHTS_PROMPT_TEMPLATE,
        ReportKind::Flashcards => FLASHCARDS_PROMPT_TEMPLATE,
        ReportKind::Ats => ATS_PROMPT_TEMPLATE,
    };
    template
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe — Rust engineer.\n5 years building axum services.";
    const JD: &str = "Senior Rust Engineer. Required: axum, tokio, 5+ years.";

    #[test]
    fn render_interpolates_both_inputs_verbatim() {
        for kind in [
            ReportKind::Match,
            ReportKind::Insights,
            ReportKind::Flashcards,
            ReportKind::Ats,
        ] {
            let prompt = render(kind, RESUME, JD);
            assert!(prompt.contains(RESUME), "{} prompt lost the resume", kind.name());
            assert!(prompt.contains(JD), "{} prompt lost the JD", kind.name());
            assert!(!prompt.contains("{resume_text}"));
            assert!(!prompt.contains("{job_description}"));
        }
    }

    #[test]
    fn render_is_deterministic() {
        let a = render(ReportKind::Ats, RESUME, JD);
        let b = render(ReportKind::Ats, RESUME, JD);
        assert_eq!(a, b);
    }

    #[test]
    fn each_stage_demands_json_only_output() {
        for kind in [
            ReportKind::Match,
            ReportKind::Insights,
            ReportKind::Flashcards,
            ReportKind::Ats,
        ] {
            let prompt = render(kind, RESUME, JD);
            assert!(prompt.contains("only valid JSON"), "{}", kind.name());
        }
    }

    #[test]
    fn flashcards_prompt_requests_an_array() {
        let prompt = render(ReportKind::Flashcards, RESUME, JD);
        assert!(prompt.contains("valid JSON array"));
    }
}

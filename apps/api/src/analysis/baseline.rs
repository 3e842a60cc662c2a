//! Baseline Scorer — deterministic keyword-overlap analysis, no provider call.
//!
//! Algorithm:
//! 1. job tokens = unique(tokenize(job_desc)), order kept
//! 2. resume tokens = set of tokenize(resume_text)
//! 3. missing = job tokens absent from the resume set, job order
//! 4. match_score = round(100 × overlap / |job tokens|), 0 for an empty job description
//!
//! Rounding is half-up (`f64::round`): 0.5 → 1, 2.5 → 3.

use std::collections::HashSet;

use crate::analysis::models::{
    AnalysisResult, RoadmapPhase, RoadmapResult, MAX_MISSING_KEYWORDS, MAX_SUGGESTIONS,
};
use crate::analysis::tokenizer::{tokenize, unique};

const FALLBACK_PHASE_TITLE: &str = "Close your skill gaps";
const FALLBACK_PHASE_DURATION: &str = "8-12 weeks";
const FALLBACK_PHASE_DESCRIPTION: &str =
    "Focus on the key topics missing from your resume compared to the job description.";
const FALLBACK_RESOURCES: &[&str] = &[
    "Official docs for each missing technology",
    "YouTube crash courses",
    "Hands-on mini projects using those skills",
];

/// Scores `resume_text` against `job_desc` by token overlap.
pub fn score(resume_text: &str, job_desc: &str) -> AnalysisResult {
    let job_tokens = unique(tokenize(job_desc));
    let resume_tokens: HashSet<String> = tokenize(resume_text).into_iter().collect();

    let (overlap, missing): (Vec<&String>, Vec<&String>) = job_tokens
        .iter()
        .partition(|t| resume_tokens.contains(t.as_str()));

    let match_score = overlap_percent(overlap.len(), job_tokens.len());

    let suggestions = missing
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|kw| format!("Include concrete examples for '{kw}' if relevant."))
        .collect();

    AnalysisResult {
        match_score,
        missing_keywords: missing
            .into_iter()
            .take(MAX_MISSING_KEYWORDS)
            .cloned()
            .collect(),
        suggestions,
        analysis: format!("Approximate match based on keyword overlap: {match_score}%."),
    }
}

/// Single-phase roadmap built from the baseline's missing keywords.
pub fn fallback_roadmap(resume_text: &str, job_desc: &str) -> RoadmapResult {
    let gaps = score(resume_text, job_desc).missing_keywords;
    RoadmapResult {
        skill_gaps: gaps.clone(),
        roadmap: vec![RoadmapPhase {
            title: FALLBACK_PHASE_TITLE.to_string(),
            duration: FALLBACK_PHASE_DURATION.to_string(),
            description: FALLBACK_PHASE_DESCRIPTION.to_string(),
            skills: gaps,
            resources: FALLBACK_RESOURCES.iter().map(|r| r.to_string()).collect(),
        }],
    }
}

fn overlap_percent(overlap: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((overlap as f64 * 100.0 / total as f64).round() as u32).min(100) as u8
}

// Prompt text for the analysis and roadmap provider calls.
// Shared JSON-only fragments live in llm_client::prompts.

use serde_json::json;

use crate::llm_client::prompts::JSON_ONLY_SUFFIX;

/// Résumé characters sent to the provider.
pub const RESUME_CHAR_LIMIT: usize = 120_000;
/// Job description characters sent to the provider.
pub const JOB_DESC_CHAR_LIMIT: usize = 60_000;

pub const ANALYSIS_SYSTEM: &str = "You are a resume analysis assistant. \
    Given a resume and an optional job description, analyze and return a STRICT JSON object with keys: \
    match_score (0-100), missing_keywords (array of strings), \
    suggestions (array of strings), analysis (string). \
    Do not include any extra commentary.";

pub const ROADMAP_SYSTEM: &str = "You are a career mentor. \
Given a resume and a target job description, identify the skill gap and generate a concise learning roadmap.
Return ONLY a STRICT JSON object with keys:
  skill_gaps: array of short strings (skills/technologies/topics missing in resume but present in job description),
  roadmap: array of objects with keys {title, duration, description, skills, resources} where:
    - title: string (phase name),
    - duration: string like '2-3 weeks',
    - description: short paragraph,
    - skills: array of strings (focus skills for this phase),
    - resources: array of strings (generic resource suggestions, no URLs required).
Do not include any explanatory text outside the JSON.";

pub fn build_analysis_prompt(resume_text: &str, job_desc: &str) -> String {
    build_prompt(ANALYSIS_SYSTEM, resume_text, job_desc)
}

pub fn build_roadmap_prompt(resume_text: &str, job_desc: &str) -> String {
    build_prompt(ROADMAP_SYSTEM, resume_text, job_desc)
}

fn build_prompt(system: &str, resume_text: &str, job_desc: &str) -> String {
    let input = json!({
        "resume": truncate_chars(resume_text, RESUME_CHAR_LIMIT),
        "job_description": truncate_chars(job_desc, JOB_DESC_CHAR_LIMIT),
    });
    format!("{system}\n\nInput JSON:\n{input}\n\n{JSON_ONLY_SUFFIX}")
}

/// Keeps at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

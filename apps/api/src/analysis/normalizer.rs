//! Response Normalizer — coerces any JSON payload into the canonical result shapes.
//!
//! This is the only place that guarantees the wire contract; providers are
//! never trusted to return the right types. Wrong-typed fields fall back to
//! their defaults instead of failing the request.

use serde_json::{Map, Value};

use crate::analysis::models::{AnalysisResult, RoadmapPhase, RoadmapResult, MAX_MISSING_KEYWORDS};
use crate::analysis::tokenizer::unique;

/// Coerces `raw` into an `AnalysisResult`. Non-object input is treated as `{}`.
pub fn normalize(raw: &Value) -> AnalysisResult {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let missing_keywords = unique(string_list(fields.get("missing_keywords")))
        .into_iter()
        .take(MAX_MISSING_KEYWORDS)
        .collect();

    AnalysisResult {
        match_score: coerce_score(fields.get("match_score")),
        missing_keywords,
        suggestions: string_list(fields.get("suggestions")),
        analysis: coerce_text(fields.get("analysis")),
    }
}

/// Coerces `raw` into a `RoadmapResult`. Phases that are not objects are dropped.
pub fn normalize_roadmap(raw: &Value) -> RoadmapResult {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let roadmap = fields
        .get("roadmap")
        .and_then(Value::as_array)
        .map(|phases| {
            phases
                .iter()
                .filter_map(Value::as_object)
                .map(|phase| RoadmapPhase {
                    title: coerce_text(phase.get("title")),
                    duration: coerce_text(phase.get("duration")),
                    description: coerce_text(phase.get("description")),
                    skills: string_list(phase.get("skills")),
                    resources: string_list(phase.get("resources")),
                })
                .collect()
        })
        .unwrap_or_default();

    RoadmapResult {
        skill_gaps: unique(string_list(fields.get("skill_gaps"))),
        roadmap,
    }
}

/// Integer-ish values truncate toward zero, then clamp into 0..=100.
fn coerce_score(value: Option<&Value>) -> u8 {
    let score = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => parse_numeric(s),
        _ => None,
    };
    score.unwrap_or(0).clamp(0, 100) as u8
}

fn parse_numeric(s: &str) -> Option<i64> {
    let s = s.trim().trim_end_matches('%').trim();
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    })
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Arrays keep their scalar items as trimmed strings; a bare string is a one-item list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(_)) => value.and_then(scalar_to_string).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

//! Analysis Orchestrator — provider first, baseline on any failure.
//!
//! ```text
//! no provider ───────────────────────────────► baseline
//! provider ─► generate ─► parse_lenient ─┬─ Ok(object) ─► normalize
//!                                        └─ Err ─────────► baseline ─► normalize
//! ```
//!
//! Callers cannot tell which path produced the result.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::baseline;
use crate::analysis::models::{AnalysisResult, RoadmapResult};
use crate::analysis::normalizer::{normalize, normalize_roadmap};
use crate::analysis::prompts::{build_analysis_prompt, build_roadmap_prompt};
use crate::llm_client::{GenerativeProvider, LlmError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("provider call failed: {0}")]
    Provider(#[from] LlmError),

    #[error("provider response is not JSON")]
    Unparseable,

    #[error("provider response is empty")]
    EmptyResponse,
}

/// Holds the optional provider; constructed once at startup.
#[derive(Clone, Default)]
pub struct Analyzer {
    provider: Option<Arc<dyn GenerativeProvider>>,
}

impl Analyzer {
    pub fn new(provider: Option<Arc<dyn GenerativeProvider>>) -> Self {
        Self { provider }
    }

    pub async fn analyze(&self, resume_text: &str, job_desc: &str) -> AnalysisResult {
        let Some(provider) = &self.provider else {
            return baseline::score(resume_text, job_desc);
        };

        let prompt = build_analysis_prompt(resume_text, job_desc);
        match request_json(provider.as_ref(), &prompt).await {
            Ok(data) => normalize(&data),
            Err(e) => {
                warn!("Falling back to baseline analysis: {e}");
                let fallback = baseline::score(resume_text, job_desc);
                normalize(&serde_json::to_value(&fallback).unwrap_or_default())
            }
        }
    }

    pub async fn roadmap(&self, resume_text: &str, job_desc: &str) -> RoadmapResult {
        let Some(provider) = &self.provider else {
            return baseline::fallback_roadmap(resume_text, job_desc);
        };

        let prompt = build_roadmap_prompt(resume_text, job_desc);
        match request_json(provider.as_ref(), &prompt).await {
            Ok(data) => normalize_roadmap(&data),
            Err(e) => {
                warn!("Falling back to baseline roadmap: {e}");
                baseline::fallback_roadmap(resume_text, job_desc)
            }
        }
    }
}

async fn request_json(
    provider: &dyn GenerativeProvider,
    prompt: &str,
) -> Result<Value, AnalysisError> {
    let text = provider.generate_json(prompt).await?;
    debug!("Provider returned {} bytes", text.len());
    parse_lenient(&text)
}

/// Parses `text` as JSON, retrying on the outermost `{ … }` slice.
/// Anything that is not a non-empty object is an error.
pub fn parse_lenient(text: &str) -> Result<Value, AnalysisError> {
    let value = serde_json::from_str::<Value>(text)
        .ok()
        .or_else(|| {
            let start = text.find('{')?;
            let end = text.rfind('}')?;
            if end <= start {
                return None;
            }
            serde_json::from_str::<Value>(&text[start..=end]).ok()
        })
        .ok_or(AnalysisError::Unparseable)?;

    match value.as_object() {
        Some(map) if !map.is_empty() => Ok(value),
        _ => Err(AnalysisError::EmptyResponse),
    }
}

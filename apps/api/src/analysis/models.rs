use serde::{Deserialize, Serialize};

/// Most missing keywords ever returned to a client.
pub const MAX_MISSING_KEYWORDS: usize = 20;
/// Most keyword-derived suggestions the baseline produces.
pub const MAX_SUGGESTIONS: usize = 10;

/// Canonical analysis payload. Every field is always present on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 – 100 inclusive
    pub match_score: u8,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub analysis: String,
}

/// One phase of a learning roadmap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub title: String,
    pub duration: String,
    pub description: String,
    pub skills: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResult {
    pub skill_gaps: Vec<String>,
    pub roadmap: Vec<RoadmapPhase>,
}

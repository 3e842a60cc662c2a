// Shared prompt fragments. Each feature keeps its own prompts.rs beside it;
// only cross-cutting pieces live here.

/// Closing instruction appended to every JSON-returning prompt.
pub const JSON_ONLY_SUFFIX: &str = "Respond with only the JSON object.";

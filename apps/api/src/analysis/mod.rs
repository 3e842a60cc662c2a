// Résumé analysis: tokenizer → baseline scorer, provider orchestration,
// and the normalizer that fixes the output shape for both paths.

pub mod baseline;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod tokenizer;

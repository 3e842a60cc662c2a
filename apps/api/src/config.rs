use anyhow::{Context, Result};
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Built once at startup; handlers only ever see a clone of it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini credential. `None` runs the service in baseline-only mode.
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub frontend_url: String,
    pub port: u16,
    pub max_upload_mb: usize,
    pub ocr_enabled: bool,
    pub ocr_dpi: u32,
    pub ocr_lang: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: optional_env("GOOGLE_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            llm_max_retries: parse_env("LLM_MAX_RETRIES", 1)?,
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
            port: parse_env("PORT", 8000)?,
            max_upload_mb: parse_env("MAX_UPLOAD_MB", 10)?,
            ocr_enabled: parse_env("OCR_ENABLED", true)?,
            ocr_dpi: parse_env("OCR_DPI", 150)?,
            ocr_lang: env_or("OCR_LANG", "eng"),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            llm_timeout_secs: 60,
            llm_max_retries: 1,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8000,
            max_upload_mb: 10,
            ocr_enabled: true,
            ocr_dpi: 150,
            ocr_lang: "eng".to_string(),
            rust_log: "info".to_string(),
        }
    }
}

/// Blank values count as unset so `GOOGLE_API_KEY=` in a .env disables the provider.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_port() {
        let port: u16 = parse_value("PORT", "9000").unwrap();
        assert_eq!(port, 9000);
    }

    #[test]
    fn test_parse_value_rejects_garbage_with_key_in_message() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_value_bool() {
        assert!(!parse_value::<bool>("OCR_ENABLED", "false").unwrap());
    }

    #[test]
    fn test_max_upload_bytes() {
        let config = Config {
            max_upload_mb: 2,
            ..Config::default()
        };
        assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_default_has_no_credential() {
        assert!(Config::default().google_api_key.is_none());
    }
}

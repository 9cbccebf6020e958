use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Startup fails if `OPENAI_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub upstream_timeout: Duration,
    /// Amazon Associates tag. `None` when unset or empty.
    pub affiliate_tag: Option<String>,
    pub allowed_origins: Vec<String>,
    pub products_file: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut allowed_origins = match optional_env("CORS_ALLOWED_ORIGINS") {
            Some(list) => parse_origins(&list),
            None => vec![DEFAULT_ORIGIN.to_string()],
        };
        if let Some(frontend) = optional_env("FRONTEND_URL") {
            if !allowed_origins.contains(&frontend) {
                allowed_origins.push(frontend);
            }
        }

        let upstream_timeout_secs = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            affiliate_tag: optional_env("AMAZON_ASSOC_TAG"),
            allowed_origins,
            products_file: optional_env("PRODUCTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("products.json")),
            static_dir: optional_env("STATIC_DIR").map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Masked form of the API key, safe to log.
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.openai_api_key.chars().take(8).collect();
        format!("{prefix}...")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads a variable, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins(" https://a.example , ,https://b.example,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_require_env_fails_when_unset() {
        let key = "SCANNER_API_TEST_REQUIRE_ENV_UNSET";
        std::env::remove_var(key);
        let err = require_env(key).unwrap_err();
        assert!(err.to_string().contains(key));
    }

    #[test]
    fn test_require_env_treats_blank_as_missing() {
        let key = "SCANNER_API_TEST_REQUIRE_ENV_BLANK";
        std::env::set_var(key, "   ");
        assert!(require_env(key).is_err());

        std::env::set_var(key, "sk-live");
        assert_eq!(require_env(key).unwrap(), "sk-live");
        std::env::remove_var(key);
    }

    #[test]
    fn test_optional_env_treats_blank_as_absent() {
        let key = "SCANNER_API_TEST_OPTIONAL_ENV_BLANK";
        std::env::set_var(key, "  ");
        assert_eq!(optional_env(key), None);

        std::env::set_var(key, " tag-20 ");
        assert_eq!(optional_env(key).as_deref(), Some("tag-20"));
        std::env::remove_var(key);
    }

    #[test]
    fn test_masked_api_key_hides_the_tail() {
        let config = Config {
            openai_api_key: "sk-abcdefghijklmnop".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(30),
            affiliate_tag: None,
            allowed_origins: vec![],
            products_file: PathBuf::from("products.json"),
            static_dir: None,
            port: 5000,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.masked_api_key(), "sk-abcde...");
    }
}

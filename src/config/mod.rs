// src/config/mod.rs
// Environment-based configuration - single source of truth for all env vars

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct SeoConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,

    // ── Webhook Configuration
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
    pub fallback_to_heuristic: bool,

    // ── Logging Configuration
    pub log_level: String,
}

// Values may carry trailing `# comments` from .env files
fn clean_value(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => match clean_value(&val).parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        None => default,
    }
}

fn env_bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| parse_bool(clean_value(&v)))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl SeoConfig {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Note: .env file not found. Using environment variables and defaults.");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup("SEO_WEBHOOK_URL")
            .map(|v| clean_value(&v).to_string())
            .filter(|v| !v.is_empty());

        Self {
            host: env_var_or(&lookup, "SEO_HOST", "0.0.0.0".to_string()),
            port: env_var_or(&lookup, "SEO_PORT", 3000),
            request_timeout_secs: env_var_or(&lookup, "SEO_REQUEST_TIMEOUT_SECS", 180),
            webhook_url,
            webhook_timeout_secs: env_var_or(&lookup, "SEO_WEBHOOK_TIMEOUT_SECS", 120),
            fallback_to_heuristic: env_bool_or(&lookup, "SEO_FALLBACK_TO_HEURISTIC", true),
            log_level: env_var_or(&lookup, "SEO_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Tracing level for the subscriber, INFO when unrecognised
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    /// Check settings that parse but cannot work
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        match &self.webhook_url {
            Some(raw) => match url::Url::parse(raw) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => validation.add_error(format!(
                    "SEO_WEBHOOK_URL must use http or https, got '{}'",
                    parsed.scheme()
                )),
                Err(e) => validation.add_error(format!("SEO_WEBHOOK_URL is not a valid URL: {}", e)),
            },
            None => validation.add_warning(
                "SEO_WEBHOOK_URL not set - every analysis will use the heuristic scorer",
            ),
        }

        if self.webhook_timeout_secs == 0 {
            validation.add_error("SEO_WEBHOOK_TIMEOUT_SECS must be greater than zero");
        }
        if self.request_timeout_secs < self.webhook_timeout_secs {
            validation.add_warning(
                "SEO_REQUEST_TIMEOUT_SECS is shorter than the webhook timeout; slow webhooks will be cut off",
            );
        }
        if self.log_level.parse::<Level>().is_err() {
            validation.add_warning(format!(
                "SEO_LOG_LEVEL '{}' not recognised, using info",
                self.log_level
            ));
        }

        validation
    }
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        lines.join("\n")
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<SeoConfig> = Lazy::new(SeoConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SeoConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SeoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = SeoConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.webhook_url, None);
        assert_eq!(config.webhook_timeout_secs, 120);
        assert!(config.fallback_to_heuristic);
        assert_eq!(config.tracing_level(), Level::INFO);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_values_with_comments_and_whitespace() {
        let config = config_from(&[
            ("SEO_PORT", " 8080  # dev port"),
            ("SEO_FALLBACK_TO_HEURISTIC", "off"),
            ("SEO_LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.port, 8080);
        assert!(!config.fallback_to_heuristic);
        assert_eq!(config.tracing_level(), Level::DEBUG);
    }

    #[test]
    fn test_unparseable_value_falls_back_to_default() {
        let config = config_from(&[("SEO_PORT", "not-a-port")]);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_blank_webhook_url_is_unset() {
        let config = config_from(&[("SEO_WEBHOOK_URL", "   ")]);
        assert_eq!(config.webhook_url, None);
    }

    #[test]
    fn test_validate_missing_webhook_is_warning() {
        let validation = SeoConfig::default().validate();
        assert!(validation.is_valid());
        assert!(validation.warnings.iter().any(|w| w.contains("SEO_WEBHOOK_URL")));
    }

    #[test]
    fn test_validate_bad_webhook_url_is_error() {
        let validation = config_from(&[("SEO_WEBHOOK_URL", "ftp://example.com/hook")]).validate();
        assert!(!validation.is_valid());
        assert!(validation.report().contains("http or https"));

        let validation = config_from(&[("SEO_WEBHOOK_URL", "not a url")]).validate();
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let validation = config_from(&[
            ("SEO_WEBHOOK_URL", "https://hooks.example.com/seo"),
            ("SEO_WEBHOOK_TIMEOUT_SECS", "0"),
        ])
        .validate();
        assert!(!validation.is_valid());
        assert!(validation.report().starts_with("Errors:"));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}

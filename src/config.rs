use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    /// Commands that contact the model need a key; the rest do not
    pub fn require_api_key(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!(
                "Gemini API key is not configured (set gemini.api_key, PIPECOST__GEMINI__API_KEY or GEMINI_API_KEY)"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Load configuration: defaults, then the TOML file (if present), then
/// `PIPECOST__SECTION__KEY` environment variables. `GEMINI_API_KEY` fills in
/// a key that is still empty after that.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("gemini.api_key", "")?
        .set_default("gemini.base_url", DEFAULT_BASE_URL)?
        .set_default("gemini.model", DEFAULT_MODEL)?
        .set_default("gemini.timeout_seconds", 120)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PIPECOST").separator("__"))
        .build()?;

    let mut cfg: Config = config.try_deserialize()?;
    if cfg.gemini.api_key.trim().is_empty() {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            cfg.gemini.api_key = key;
        }
    }
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.gemini.model.trim().is_empty() {
        anyhow::bail!("gemini.model cannot be empty");
    }

    if !cfg.gemini.base_url.starts_with("http://") && !cfg.gemini.base_url.starts_with("https://") {
        anyhow::bail!(
            "gemini.base_url must be an http(s) URL, got '{}'",
            cfg.gemini.base_url
        );
    }

    if cfg.gemini.timeout_seconds == 0 {
        anyhow::bail!("gemini.timeout_seconds must be greater than zero");
    }

    if let Some(temperature) = cfg.gemini.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            anyhow::bail!(
                "gemini.temperature must be between 0.0 and 2.0, got {}",
                temperature
            );
        }
    }

    match cfg.logging.format.to_ascii_lowercase().as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("logging.format must be 'text' or 'json', got '{}'", other),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            gemini: GeminiConfig {
                api_key: "AIzaSy-test-key-0000".to_string(),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: DEFAULT_MODEL.to_string(),
                timeout_seconds: 120,
                temperature: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }

    #[test]
    fn test_validate_config_accepts_defaults() {
        assert!(validate_config(&create_test_config()).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_bad_base_url() {
        let mut cfg = create_test_config();
        cfg.gemini.base_url = "generativelanguage.googleapis.com".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("http(s) URL"));
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        let mut cfg = create_test_config();
        cfg.gemini.timeout_seconds = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_temperature_out_of_range() {
        let mut cfg = create_test_config();
        cfg.gemini.temperature = Some(3.5);
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_unknown_log_format() {
        let mut cfg = create_test_config();
        cfg.logging.format = "xml".to_string();
        assert!(validate_config(&cfg).is_err());

        cfg.logging.format = "JSON".to_string();
        assert!(validate_config(&cfg).is_ok());
        assert!(cfg.logging.is_json());
    }

    #[test]
    fn test_require_api_key() {
        let mut cfg = create_test_config();
        assert!(cfg.gemini.require_api_key().is_ok());

        cfg.gemini.api_key = "  ".to_string();
        assert!(cfg.gemini.require_api_key().is_err());
    }
}

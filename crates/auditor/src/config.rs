use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig {
    /// Bare host/IP (HTTPS assumed) or a full base URL
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Pre-issued API key; skips key generation when set
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: None,
            password: None,
            api_key: None,
            verify_tls: default_verify_tls(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Devices audited at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_enabled")]
    pub versions: bool,

    #[serde(default = "default_enabled")]
    pub licenses: bool,

    #[serde(default = "default_enabled")]
    pub jobs: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            versions: true,
            licenses: true,
            jobs: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Print the report tables to stdout
    #[serde(default = "default_enabled")]
    pub console: bool,

    /// Write the full report as JSON to this path
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            console: true,
            json_path: None,
        }
    }
}

// Default value functions
fn default_verify_tls() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}
fn default_concurrency() -> usize {
    4
}
fn default_enabled() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Environment variables read by the earlier audit scripts, mapped onto config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PANORAMA_IP", "controller.host"),
    ("PANORAMA_USERNAME", "controller.username"),
    ("PANORAMA_PASSWORD", "controller.password"),
    ("PANORAMA_API_KEY", "controller.api_key"),
];

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration (optional)
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with FLEET_AUDIT__ prefix
    /// 4. PANORAMA_IP / PANORAMA_USERNAME / PANORAMA_PASSWORD / PANORAMA_API_KEY
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("FLEET_AUDIT").separator("__"));

        for (var, key) in LEGACY_ENV {
            let value = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Build a validated configuration from a TOML document, without touching files or the
    /// environment.
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [controller]
            host = "panorama.test"
            username = "auditor"
            password = "secret"
            verify_tls = true
            timeout_secs = 30

            [audit]
            concurrency = 4

            [logging]
            level = "info"
            format = "pretty"

            [report]
            console = true
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.controller.host.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "FLEET_AUDIT__CONTROLLER__HOST (or PANORAMA_IP) must be set".to_string(),
            ));
        }

        if self.controller.api_key().is_none() && self.controller.credentials().is_none() {
            return Err(ConfigValidationError::MissingRequired(
                "either controller.api_key or both controller.username and controller.password"
                    .to_string(),
            ));
        }

        if self.controller.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "controller.timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.audit.concurrency == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "audit.concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl ControllerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pre-issued API key, if a non-blank one is configured.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(&self.api_key)
    }

    /// Username and password, if both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((non_blank(&self.username)?, non_blank(&self.password)?))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load_with_defaults() {
        let config = Config::load_for_test(&[]).expect("Failed to load config");

        assert_eq!(config.controller.host, "panorama.test");
        assert!(config.controller.verify_tls);
        assert_eq!(config.controller.timeout(), Duration::from_secs(30));
        assert_eq!(config.audit.concurrency, 4);
        assert!(config.audit.versions && config.audit.licenses && config.audit.jobs);
        assert_eq!(config.logging.level, "info");
        assert!(config.report.console);
        assert!(config.report.json_path.is_none());
    }

    #[test]
    fn test_config_override() {
        let config = Config::load_for_test(&[
            ("audit.concurrency", "8"),
            ("audit.jobs", "false"),
            ("logging.format", "json"),
            ("report.json_path", "/tmp/audit.json"),
        ])
        .expect("Failed to load config");

        assert_eq!(config.audit.concurrency, 8);
        assert!(!config.audit.jobs);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.report.json_path, Some(PathBuf::from("/tmp/audit.json")));
    }

    #[test]
    fn test_from_toml_minimal() {
        let config = Config::from_toml(
            r#"
            [controller]
            host = "10.0.0.5"
            api_key = "LUFRPT1abc"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.controller.api_key(), Some("LUFRPT1abc"));
        assert_eq!(config.controller.credentials(), None);
        assert_eq!(config.audit.concurrency, 4);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validation_missing_host() {
        let config =
            Config::load_for_test(&[("controller.host", "")]).expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("FLEET_AUDIT__CONTROLLER__HOST"));
    }

    #[test]
    fn test_validation_requires_credentials_or_key() {
        let config = Config::load_for_test(&[("controller.password", "")])
            .expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("api_key"));

        let config = Config::load_for_test(&[
            ("controller.password", ""),
            ("controller.api_key", "LUFRPT1abc"),
        ])
        .expect("Failed to load config");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_concurrency() {
        let config =
            Config::load_for_test(&[("audit.concurrency", "0")]).expect("Failed to load config");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("audit.concurrency"));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = Config::load_for_test(&[("controller.timeout_secs", "0")])
            .expect("Failed to load config");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_rejects_missing_host() {
        let result = Config::from_toml(
            r#"
            [controller]
            username = "admin"
            password = "secret"
            "#,
        );
        assert!(result.is_err());
    }
}

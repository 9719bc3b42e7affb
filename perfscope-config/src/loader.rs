//! Configuration loading and environment variable handling

use crate::domains::PerfscopeConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "PERFSCOPE".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<PerfscopeConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: PerfscopeConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<PerfscopeConfig> {
        let mut config = PerfscopeConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<PerfscopeConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut PerfscopeConfig) -> ConfigResult<()> {
        self.apply_http_overrides(&mut config.http)?;
        self.apply_probe_overrides(&mut config.probe);
        self.apply_load_overrides(&mut config.load)?;
        self.apply_analysis_overrides(&mut config.analysis);
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            config.timeout = Duration::from_secs(parse_env("HTTP_TIMEOUT", &timeout)?);
        }

        if let Ok(timeout) = self.get_env_var("HTTP_CONNECT_TIMEOUT") {
            config.connect_timeout =
                Duration::from_secs(parse_env("HTTP_CONNECT_TIMEOUT", &timeout)?);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = parse_env("HTTP_VERIFY_SSL", &verify_ssl)?;
        }

        Ok(())
    }

    /// Apply probe target overrides
    fn apply_probe_overrides(&self, config: &mut crate::domains::probe::ProbeConfig) {
        if let Ok(target_url) = self.get_env_var("TARGET_URL") {
            config.target_url = target_url;
        }

        if let Ok(recipient) = self.get_env_var("NOTIFICATION_RECIPIENT") {
            config.notification_recipient = recipient;
        }
    }

    /// Apply load test overrides
    fn apply_load_overrides(
        &self,
        config: &mut crate::domains::load::LoadConfig,
    ) -> ConfigResult<()> {
        if let Ok(users) = self.get_env_var("LOAD_CONCURRENT_USERS") {
            config.default_concurrent_users = parse_env("LOAD_CONCURRENT_USERS", &users)?;
        }

        if let Ok(requests) = self.get_env_var("LOAD_REQUESTS_PER_USER") {
            config.default_requests_per_user = parse_env("LOAD_REQUESTS_PER_USER", &requests)?;
        }

        if let Ok(max_users) = self.get_env_var("LOAD_MAX_CONCURRENT_USERS") {
            config.max_concurrent_users = parse_env("LOAD_MAX_CONCURRENT_USERS", &max_users)?;
        }

        Ok(())
    }

    /// Apply analysis overrides
    fn apply_analysis_overrides(&self, config: &mut crate::domains::analysis::AnalysisConfig) {
        if let Ok(report_dir) = self.get_env_var("REPORT_DIR") {
            config.report_dir = report_dir.into();
        }
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env<T>(name: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e)))
}

use anyhow::Result;
use perfscope_config::domains::logging::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Build the env filter for a configuration
///
/// `RUST_LOG` is only consulted when the configured directives do not parse.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let directives = match config.filter {
        Some(ref extra) => format!("{},{}", config.level, extra),
        None => config.level.to_string(),
    };

    EnvFilter::try_new(&directives)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    // Use try_init to avoid panic if global subscriber already set
    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

/// Initialize simple tracing for basic console output
pub fn init_simple_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfscope_config::domains::logging::LogLevel;

    #[test]
    fn test_filter_includes_extra_directives() {
        let config = LoggingConfig {
            level: LogLevel::Warn,
            filter: Some("perfscope_execution=debug".to_string()),
            ..LoggingConfig::default()
        };
        let filter = build_env_filter(&config).to_string();
        assert!(filter.contains("warn"));
        assert!(filter.contains("perfscope_execution=debug"));
    }

    #[test]
    fn test_repeated_initialisation_is_harmless() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..LoggingConfig::default()
        };
        assert!(init_logging_from_config(&config).is_ok());
        assert!(init_logging_from_config(&config).is_ok());
        assert!(init_simple_tracing("debug").is_ok());
    }
}

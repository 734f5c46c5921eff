//! Log subscriber setup.
//!
//! The library only emits `tracing` events; binaries and tests opt in to output by calling
//! [`init_logging`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::EnvConfig;
use crate::error::LoggingError;

/// Filter used when `TAGS_INPUT_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "warn,tags_input=debug"
    } else {
        "warn"
    }
}

/// Builds the filter described by `config`.
pub fn build_filter(config: &EnvConfig) -> Result<EnvFilter, LoggingError> {
    let directive = config
        .log_filter
        .clone()
        .unwrap_or_else(|| default_directive(config.debug).to_string());
    EnvFilter::try_new(&directive)
        .map_err(|source| LoggingError::InvalidFilter { directive, source })
}

/// Installs a global stderr subscriber. Fails if one is already installed.
pub fn init_logging(config: &EnvConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|_| LoggingError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{build_filter, default_directive};
    use crate::config::EnvConfig;
    use crate::error::LoggingError;

    #[test]
    fn debug_flag_scopes_to_this_crate() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "warn,tags_input=debug");
    }

    #[test]
    fn explicit_filter_must_parse() {
        let config = EnvConfig {
            log_filter: Some("tags_input=notalevel".to_string()),
            ..EnvConfig::default()
        };
        assert_matches!(build_filter(&config), Err(LoggingError::InvalidFilter { .. }));

        let config = EnvConfig {
            log_filter: Some("tags_input=trace".to_string()),
            ..EnvConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }
}

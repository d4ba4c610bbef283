//! Process-wide log output.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// How events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `level` is not one of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    #[error("unknown log level '{0}'")]
    Level(String),

    /// The explicit filter did not parse.
    #[error("invalid log filter '{filter}'")]
    Filter {
        /// The rejected directive string.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// Another global subscriber is already installed.
    #[error(transparent)]
    Install(#[from] TryInitError),
}

/// Logging settings, deserializable from a config file.
///
/// Events go to stderr. Which events pass is decided by the first of:
/// `filter` if set, `RUST_LOG` if set and valid, otherwise `level` for every target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default maximum level, e.g. `"warn"`.
    pub level: String,
    /// Output rendering.
    pub format: LogFormat,
    /// Directive string such as `cairn_agent=debug,reqwest=warn`.
    pub filter: Option<String>,
    /// Emit span enter and exit events.
    pub spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
            filter: None,
            spans: false,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter this config would install.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::Filter`] for an unparsable explicit filter and
    /// [`LoggingError::Level`] for an unknown level.
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Some(filter) = &self.filter {
            return EnvFilter::try_new(filter).map_err(|source| LoggingError::Filter {
                filter: filter.clone(),
                source,
            });
        }
        if let Ok(from_env) = EnvFilter::try_from_default_env() {
            return Ok(from_env);
        }
        let level: LevelFilter = self
            .level
            .parse()
            .map_err(|_| LoggingError::Level(self.level.clone()))?;
        Ok(EnvFilter::new(level.to_string()))
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    ///
    /// Fails when the filter is invalid or a subscriber is already installed.
    pub fn install(&self) -> Result<(), LoggingError> {
        let spans = if self.spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_span_events(spans);
        let layer = match self.format {
            LogFormat::Pretty => base.pretty().boxed(),
            LogFormat::Compact => base.compact().boxed(),
            LogFormat::Json => base.json().boxed(),
        };

        tracing_subscriber::registry()
            .with(layer)
            .with(self.env_filter()?)
            .try_init()?;

        tracing::debug!(format = ?self.format, "logging installed");
        Ok(())
    }
}

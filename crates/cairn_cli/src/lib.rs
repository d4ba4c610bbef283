//! Interactive chat front end for Cairn agents.
//!
//! The `cairn` binary reads a models file and an agent file, assembles the
//! agent tree they describe and runs a line-based chat on stdin/stdout.
//!
//! ```bash
//! cairn --agent ./agent.json --models ./models.json
//! ```

pub mod assemble;
pub mod config;
pub mod repl;

use cairn_core::{LogFormat, LoggingConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "cairn", version, about = "Chat with a reason-act agent")]
pub struct Args {
    /// The path of the agent config file to use.
    #[arg(long, default_value = "./agent.json")]
    pub agent: PathBuf,

    /// The path of the models config file to use.
    #[arg(long, default_value = "./models.json")]
    pub models: PathBuf,

    /// Default log level when neither `--log-filter` nor `RUST_LOG` is given.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log filter, e.g. `cairn_agent=debug`. Overrides `RUST_LOG`.
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Compact)]
    pub log_format: FormatArg,
}

impl Args {
    /// Logging settings selected by the flags.
    #[must_use]
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format.into(),
            filter: self.log_filter.clone(),
            spans: false,
        }
    }
}

/// `--log-format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line output.
    Compact,
    /// One JSON object per event.
    Json,
}

impl From<FormatArg> for LogFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pretty => Self::Pretty,
            FormatArg::Compact => Self::Compact,
            FormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_logging_config() {
        let args = Args::parse_from([
            "cairn",
            "--log-format",
            "json",
            "--log-filter",
            "cairn_agent=debug",
        ]);
        let logging = args.logging();
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.filter.as_deref(), Some("cairn_agent=debug"));
        assert_eq!(logging.level, "warn");
        assert_eq!(args.agent, PathBuf::from("./agent.json"));
    }
}

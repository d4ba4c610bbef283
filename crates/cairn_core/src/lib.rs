//! Ambient infrastructure shared by Cairn binaries.
//!
//! Library crates only emit `tracing` events. Whoever owns `main` installs a
//! subscriber, usually from a [`LoggingConfig`] read alongside other settings.
//!
//! ```no_run
//! use cairn_core::{LogFormat, LoggingConfig};
//!
//! LoggingConfig {
//!     format: LogFormat::Json,
//!     filter: Some("cairn_agent=debug,reqwest=warn".to_string()),
//!     ..LoggingConfig::default()
//! }
//! .install()
//! .ok();
//! ```

pub mod logging;

pub use logging::{LogFormat, LoggingConfig, LoggingError};

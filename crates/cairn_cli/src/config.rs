//! JSON configuration files read by the CLI.
//!
//! Two files describe a session. The models file maps a short model name to
//! an OpenAI-compatible endpoint:
//!
//! ```json
//! { "models": { "fast": { "url": "https://api.openai.com/v1", "name": "gpt-4o-mini", "key": "" } } }
//! ```
//!
//! The agent file describes the agent tree. Every field is optional:
//!
//! ```json
//! {
//!   "agent_name": "assistant",
//!   "agent_description": ["General helper."],
//!   "personality": "You are friendly.",
//!   "model_name": "fast",
//!   "view_files": true,
//!   "max_steps": 10,
//!   "scenarios": { "lost": { "headline": "User is lost", "takeaways": ["Start from the README"] } },
//!   "sub_agents": [ { "agent_name": "researcher", "model_name": "fast" } ]
//! }
//! ```

use cairn_agent::Scenario;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable consulted when a model entry has no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Errors loading or resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The I/O failure.
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for its schema.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The file.
        path: PathBuf,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// An agent names a model missing from the models file.
    #[error("could not find model for '{0}'")]
    UnknownModel(String),

    /// A model has no key and the fallback variable is unset.
    #[error("model '{0}' has no key and {API_KEY_ENV} is not set")]
    MissingApiKey(String),

    /// The agent tree could not be built.
    #[error(transparent)]
    Agent(#[from] cairn_agent::AgentError),

    /// A model handle could not be created.
    #[error(transparent)]
    Model(#[from] cairn_models::error::ModelLookupError),
}

/// The models file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsFile {
    /// Models by the short name agents refer to them with.
    pub models: BTreeMap<String, ModelEntry>,
}

/// One OpenAI-compatible model endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelEntry {
    /// Base URL of the API. Empty means the public `OpenAI` endpoint.
    pub url: String,
    /// Model name sent to the API.
    pub name: String,
    /// API key. Empty means use [`API_KEY_ENV`].
    pub key: String,
}

impl ModelEntry {
    /// Returns the API key, falling back to the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if neither is set.
    pub fn api_key(&self, model: &str) -> Result<String, ConfigError> {
        if !self.key.is_empty() {
            return Ok(self.key.clone());
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(model.to_string()))
    }
}

/// The agent file; sub-agents nest recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentFile {
    /// Name used for the tool when this agent is a sub-agent.
    pub agent_name: String,
    /// Description lines of that tool.
    pub agent_description: Vec<String>,
    /// Personality placed in the system prompt.
    pub personality: String,
    /// Key into [`ModelsFile::models`].
    pub model_name: String,
    /// Agents exposed to this one as tools.
    pub sub_agents: Vec<AgentFile>,
    /// Whether to give the agent `list_directory` and `read_file`.
    pub view_files: bool,
    /// Scenarios by key.
    pub scenarios: BTreeMap<String, Scenario>,
    /// Step cap per task.
    pub max_steps: Option<usize>,
}

/// Reads and decodes a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_file_defaults_missing_fields() {
        let file: AgentFile = serde_json::from_str(r#"{"model_name":"fast"}"#).unwrap();
        assert_eq!(file.model_name, "fast");
        assert!(file.sub_agents.is_empty());
        assert!(!file.view_files);
        assert_eq!(file.max_steps, None);
    }

    #[test]
    fn nested_sub_agents_parse() {
        let file: AgentFile = serde_json::from_str(
            r#"{"agent_name":"top","sub_agents":[{"agent_name":"mid","sub_agents":[{"agent_name":"leaf"}]}]}"#,
        )
        .unwrap();
        assert_eq!(file.sub_agents[0].sub_agents[0].agent_name, "leaf");
    }

    #[test]
    fn explicit_key_wins() {
        let entry = ModelEntry {
            key: "sk-test".to_string(),
            ..ModelEntry::default()
        };
        assert_eq!(entry.api_key("fast").unwrap(), "sk-test");
    }
}

//! Agent configuration and its defaults.

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default system prompt template.
///
/// Rendered with `personality`, `tools` (each with `name` and `description`
/// lines), `scenarios` (each with `key` and `headline`, sorted by key) and
/// `structured_answer`.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("system_prompt.jinja");

/// Default prefix of the message that opens each task.
pub const DEFAULT_TASK_PREFIX: &str =
    "You are now in reason-action mode. Your next task / query to respond to is as follows:\n";

/// Default message that switches the model into final-answer mode.
pub const DEFAULT_FINAL_ANSWER_MESSAGE: &str =
    "You are now in final answer mode, create your final answer.";

/// How the final-answer step asks the model to reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFormat {
    /// A `{"response": ...}` object constrained by a schema.
    #[default]
    Structured,
    /// Unconstrained text, used verbatim as the answer.
    PlainText,
}

/// Static configuration of an agent.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Free text describing who the agent is, placed in the system prompt.
    pub personality: String,
    /// `minijinja` template for the system prompt.
    pub system_prompt: String,
    /// Prefix of the message that opens each task.
    pub task_prefix: String,
    /// Message that switches the model into final-answer mode.
    pub final_answer_message: String,
    /// Scenarios listed in the system prompt, by key.
    pub scenarios: BTreeMap<String, Scenario>,
    /// Reply format of the final-answer step.
    pub answer_format: AnswerFormat,
    /// Upper bound on reasoning steps per task. `None` means unbounded.
    ///
    /// Once reached, the task moves to its final answer with whatever it has.
    pub max_steps: Option<usize>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            personality: String::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            task_prefix: DEFAULT_TASK_PREFIX.to_string(),
            final_answer_message: DEFAULT_FINAL_ANSWER_MESSAGE.to_string(),
            scenarios: BTreeMap::new(),
            answer_format: AnswerFormat::default(),
            max_steps: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"personality":"terse","answer_format":"plain_text"}"#)
                .unwrap();

        assert_eq!(config.personality, "terse");
        assert_eq!(config.answer_format, AnswerFormat::PlainText);
        assert_eq!(config.task_prefix, DEFAULT_TASK_PREFIX);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.max_steps, None);
    }
}

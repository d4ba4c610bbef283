//! Rendering of execution state into model messages.
//!
//! The encoder replays earlier steps in a canonical JSON form instead of the
//! model's raw text, so every step the model sees looks exactly like the
//! format it is asked to produce, however deep the history.
//!
//! For a state with one completed task and an active task with one step, a
//! final-answer encoding is:
//!
//! ```text
//! system     rendered system prompt
//! user       <task prefix><earlier task>
//! assistant  {"reasoning": ..., "actions": [...]}
//! user       [{"observed": ...}, ...]            only if the step had actions
//! user       <final answer message>
//! assistant  {"response": ...}                  raw text for plain-text agents
//! user       <task prefix><active task>
//! assistant  {"reasoning": ..., "actions": [...]}
//! user       [{"observed": ...}, ...]
//! user       <final answer message>              final-answer mode only
//! ```

use crate::action::Observation;
use crate::config::{AgentConfig, AnswerFormat};
use crate::error::BuildError;
use crate::scenario::Scenario;
use crate::state::{AnswerResponse, ExecutionState, ReasoningStep};
use cairn_models::llm::Message;
use cairn_tools::ToolRegistry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Which step the messages are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// The model should continue reasoning and pick actions.
    Reasoning,
    /// The model should produce the final answer.
    FinalAnswer,
}

/// Turns an [`ExecutionState`] into the ordered messages of one model call.
#[derive(Debug, Clone)]
pub struct StateEncoder {
    system_prompt: String,
    task_prefix: String,
    final_answer_message: String,
    answer_format: AnswerFormat,
}

#[derive(Serialize)]
struct PromptContext<'a> {
    personality: &'a str,
    tools: Vec<PromptTool>,
    scenarios: Vec<PromptScenario<'a>>,
    structured_answer: bool,
}

#[derive(Serialize)]
struct PromptTool {
    name: String,
    description: Vec<String>,
}

#[derive(Serialize)]
struct PromptScenario<'a> {
    key: &'a str,
    headline: &'a str,
    takeaways: &'a [String],
}

/// Renders a system prompt template.
///
/// Scenarios are listed in ascending key order and tools in registration order.
///
/// # Errors
///
/// Returns the template error if `template` does not compile or render.
pub fn render_system_prompt(
    template: &str,
    personality: &str,
    tools: &ToolRegistry,
    scenarios: &BTreeMap<String, Scenario>,
    answer_format: AnswerFormat,
) -> Result<String, minijinja::Error> {
    let context = PromptContext {
        personality,
        tools: tools
            .iter()
            .map(|tool| PromptTool {
                name: tool.name().to_string(),
                description: tool.description(),
            })
            .collect(),
        scenarios: scenarios
            .iter()
            .map(|(key, scenario)| PromptScenario {
                key,
                headline: &scenario.headline,
                takeaways: &scenario.takeaways,
            })
            .collect(),
        structured_answer: answer_format == AnswerFormat::Structured,
    };

    minijinja::Environment::new().render_str(template, context)
}

impl StateEncoder {
    /// Creates an encoder from an already rendered system prompt.
    #[must_use]
    pub fn new(
        system_prompt: impl Into<String>,
        task_prefix: impl Into<String>,
        final_answer_message: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            task_prefix: task_prefix.into(),
            final_answer_message: final_answer_message.into(),
            answer_format: AnswerFormat::default(),
        }
    }

    /// Sets the format earlier answers are replayed in.
    #[must_use]
    pub fn answer_format(mut self, format: AnswerFormat) -> Self {
        self.answer_format = format;
        self
    }

    /// Creates an encoder by rendering the configured system prompt template
    /// against `tools`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Template`] if the template is invalid.
    pub fn from_config(config: &AgentConfig, tools: &ToolRegistry) -> Result<Self, BuildError> {
        let system_prompt = render_system_prompt(
            &config.system_prompt,
            &config.personality,
            tools,
            &config.scenarios,
            config.answer_format,
        )?;
        Ok(Self::new(
            system_prompt,
            &config.task_prefix,
            &config.final_answer_message,
        )
        .answer_format(config.answer_format))
    }

    /// Returns the rendered system prompt.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Encodes `state` for a call in the given mode.
    ///
    /// # Errors
    ///
    /// Fails only if a step cannot be serialized to JSON.
    pub fn encode(
        &self,
        state: &ExecutionState<'_>,
        mode: EncodeMode,
    ) -> Result<Vec<Message>, serde_json::Error> {
        let mut messages = vec![Message::system(&self.system_prompt)];

        for task in state.history {
            messages.push(self.begin_task(&task.task));
            encode_steps(&task.steps, &mut messages)?;
            messages.push(Message::user(&self.final_answer_message));
            messages.push(Message::assistant(self.replay_answer(&task.response)?));
        }

        messages.push(self.begin_task(&state.active.task));
        encode_steps(&state.active.steps, &mut messages)?;

        if mode == EncodeMode::FinalAnswer {
            messages.push(Message::user(&self.final_answer_message));
        }

        tracing::debug!(
            messages = messages.len(),
            history = state.history.len(),
            steps = state.active.steps.len(),
            ?mode,
            "encoded state"
        );
        Ok(messages)
    }

    fn replay_answer(&self, response: &str) -> Result<String, serde_json::Error> {
        match self.answer_format {
            AnswerFormat::Structured => serde_json::to_string(&AnswerResponse {
                response: response.to_string(),
            }),
            AnswerFormat::PlainText => Ok(response.to_string()),
        }
    }

    fn begin_task(&self, task: &str) -> Message {
        Message::user(format!("{}{}", self.task_prefix, task))
    }
}

fn encode_steps(steps: &[ReasoningStep], messages: &mut Vec<Message>) -> Result<(), serde_json::Error> {
    for step in steps {
        messages.push(Message::assistant(serde_json::to_string(&step.to_response())?));
        if !step.is_terminal() {
            let observations: Vec<&Observation> = step
                .action_observations
                .iter()
                .map(|ao| &ao.observation)
                .collect();
            messages.push(Message::user(serde_json::to_string(&observations)?));
        }
    }
    Ok(())
}

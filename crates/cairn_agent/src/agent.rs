//! The agent facade and its builder.

use crate::config::{AgentConfig, AnswerFormat};
use crate::encoder::StateEncoder;
use crate::engine::ReActEngine;
use crate::error::{AgentError, BuildError};
use crate::hooks::{AgentHooks, FinalAnswerBeginHook, FinalAnswerChunkHook, StepCompleteHook, StepInitHook};
use crate::scenario::Scenario;
use crate::state::{AnswerResponse, CompletedTask, ReasoningResponse};
use crate::stepper::{AnswerStepper, ReasoningStepper, Stepper};
use crate::tools::scenario_tool;
use cairn_models::llm::Llm;
use cairn_tools::{Tool, ToolRegistry};
use std::sync::Arc;

/// A conversational reason-act agent.
///
/// Each call to [`answer`](Self::answer) runs one task to completion and
/// appends it to the agent's history, which later tasks see in full.
/// `answer` takes `&mut self`, so one agent serves one caller at a time.
///
/// # Example
///
/// ```no_run
/// use cairn_agent::Agent;
/// use cairn_tools::builtin::TimeTool;
/// # async fn run(llm: cairn_models::llm::Llm) -> Result<(), cairn_agent::AgentError> {
/// let mut agent = Agent::builder()
///     .llm(llm)
///     .personality("You are a concise assistant.")
///     .tool(TimeTool)
///     .build()?;
///
/// let answer = agent.answer("What time is it?").await?;
/// println!("{answer}");
/// # Ok(())
/// # }
/// ```
pub struct Agent {
    engine: ReActEngine,
    history: Vec<CompletedTask>,
    hooks: AgentHooks,
}

impl core::fmt::Debug for Agent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Agent")
            .field("engine", &self.engine)
            .field("history", &self.history.len())
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl Agent {
    /// Returns a builder with default configuration.
    #[must_use]
    pub fn builder() -> AgentBuilder {
        AgentBuilder::default()
    }

    /// Answers `query`, using every earlier task as context.
    ///
    /// The task is added to the history only if it completes.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Step`] if a model call fails or its reply cannot be decoded.
    pub async fn answer(&mut self, query: impl Into<String>) -> Result<String, AgentError> {
        let completed = self
            .engine
            .run(&self.history, query.into(), &self.hooks)
            .await?;
        let response = completed.response.clone();
        self.history.push(completed);
        Ok(response)
    }

    /// Returns the completed tasks, oldest first.
    #[must_use]
    pub fn history(&self) -> &[CompletedTask] {
        &self.history
    }

    /// Returns the tools available to the agent.
    #[must_use]
    pub fn tools(&self) -> &ToolRegistry {
        self.engine.tools()
    }

    /// Returns the agent's hooks.
    #[must_use]
    pub fn hooks(&self) -> &AgentHooks {
        &self.hooks
    }

    /// Sets the hook fired before a step's actions are dispatched.
    pub fn set_on_step_init(&mut self, hook: StepInitHook) {
        self.hooks.set_step_init(hook);
    }

    /// Sets the hook fired once a step's observations are in.
    pub fn set_on_step_complete(&mut self, hook: StepCompleteHook) {
        self.hooks.set_step_complete(hook);
    }

    /// Sets the hook fired before the final answer is generated.
    pub fn set_on_final_answer_begin(&mut self, hook: FinalAnswerBeginHook) {
        self.hooks.set_final_answer_begin(hook);
    }

    /// Sets the hook fired per streamed fragment of the final answer.
    ///
    /// Setting it makes the final-answer call stream.
    pub fn set_on_final_answer_chunk(&mut self, hook: FinalAnswerChunkHook) {
        self.hooks.set_final_answer_chunk(hook);
    }
}

/// Builder for [`Agent`].
///
/// Everything is validated in [`build`](Self::build): the system prompt
/// template must render, tool names must be unique, and a model must be set
/// unless both steppers are supplied.
#[derive(Default)]
#[must_use]
pub struct AgentBuilder {
    llm: Option<Llm>,
    config: AgentConfig,
    tools: Vec<Arc<dyn Tool>>,
    hooks: AgentHooks,
    reasoner: Option<Arc<dyn Stepper<ReasoningResponse>>>,
    answerer: Option<Arc<dyn Stepper<AnswerResponse>>>,
}

impl core::fmt::Debug for AgentBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AgentBuilder")
            .field("llm", &self.llm)
            .field("config", &self.config)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl AgentBuilder {
    /// Sets the model used by both steps.
    pub fn llm(mut self, llm: Llm) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the personality text placed in the system prompt.
    pub fn personality(mut self, personality: impl Into<String>) -> Self {
        self.config.personality = personality.into();
        self
    }

    /// Sets the system prompt template.
    pub fn system_prompt(mut self, template: impl Into<String>) -> Self {
        self.config.system_prompt = template.into();
        self
    }

    /// Sets the prefix of the message that opens each task.
    pub fn task_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.task_prefix = prefix.into();
        self
    }

    /// Sets the message that switches the model into final-answer mode.
    pub fn final_answer_message(mut self, message: impl Into<String>) -> Self {
        self.config.final_answer_message = message.into();
        self
    }

    /// Adds a scenario under `key`, replacing any scenario with the same key.
    pub fn scenario(mut self, key: impl Into<String>, scenario: Scenario) -> Self {
        self.config.scenarios.insert(key.into(), scenario);
        self
    }

    /// Adds several scenarios.
    pub fn scenarios(
        mut self,
        scenarios: impl IntoIterator<Item = (impl Into<String>, Scenario)>,
    ) -> Self {
        self.config
            .scenarios
            .extend(scenarios.into_iter().map(|(key, s)| (key.into(), s)));
        self
    }

    /// Sets the final answer's reply format.
    pub fn answer_format(mut self, format: AnswerFormat) -> Self {
        self.config.answer_format = format;
        self
    }

    /// Caps the number of reasoning steps per task.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Adds a tool.
    pub fn tool(mut self, tool: impl Tool) -> Self {
        self.tools.push(Arc::new(tool));
        self
    }

    /// Adds a tool that is shared with other agents.
    pub fn shared_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Adds several shared tools.
    pub fn tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Sets the hooks.
    pub fn hooks(mut self, hooks: AgentHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the model-backed reasoning stepper.
    pub fn reasoner(mut self, stepper: Arc<dyn Stepper<ReasoningResponse>>) -> Self {
        self.reasoner = Some(stepper);
        self
    }

    /// Replaces the model-backed final-answer stepper.
    pub fn answerer(mut self, stepper: Arc<dyn Stepper<AnswerResponse>>) -> Self {
        self.answerer = Some(stepper);
        self
    }

    /// Builds the agent.
    ///
    /// When scenarios are configured, the `investigate_scenarios` tool is
    /// added after the user's tools.
    ///
    /// # Errors
    ///
    /// - [`BuildError::DuplicateTool`] if two tools share a name.
    /// - [`BuildError::Template`] if the system prompt does not render.
    /// - [`BuildError::MissingModel`] if a model-backed stepper is needed but no model was set.
    pub fn build(self) -> Result<Agent, BuildError> {
        let Self {
            llm,
            config,
            mut tools,
            hooks,
            reasoner,
            answerer,
        } = self;

        if !config.scenarios.is_empty() {
            tools.push(Arc::new(scenario_tool(config.scenarios.clone())));
        }

        let mut registry = ToolRegistry::new();
        for tool in tools {
            let name = tool.name().to_string();
            registry
                .try_register_arc(tool)
                .map_err(|_| BuildError::DuplicateTool(name))?;
        }

        let encoder = Arc::new(StateEncoder::from_config(&config, &registry)?);

        let reasoner = match reasoner {
            Some(stepper) => stepper,
            None => Arc::new(ReasoningStepper::new(
                encoder.clone(),
                llm.clone().ok_or(BuildError::MissingModel)?,
            )),
        };
        let answerer = match answerer {
            Some(stepper) => stepper,
            None => Arc::new(AnswerStepper::new(
                encoder,
                llm.ok_or(BuildError::MissingModel)?,
                config.answer_format,
            )),
        };

        tracing::debug!(
            tools = ?registry.names(),
            scenarios = config.scenarios.len(),
            max_steps = ?config.max_steps,
            "agent built"
        );

        let engine = ReActEngine::new(reasoner, answerer, Arc::new(registry))
            .with_max_steps(config.max_steps);

        Ok(Agent {
            engine,
            history: Vec::new(),
            hooks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_tools::builtin::TimeTool;

    #[test]
    fn duplicate_tool_names_are_rejected() {
        let err = Agent::builder()
            .tool(TimeTool)
            .tool(TimeTool)
            .build()
            .unwrap_err();

        assert!(matches!(err, BuildError::DuplicateTool(name) if name == "get_time"));
    }

    #[test]
    fn missing_model_is_rejected() {
        let err = Agent::builder().build().unwrap_err();
        assert!(matches!(err, BuildError::MissingModel));
    }

    #[test]
    fn broken_template_is_rejected_before_model_check() {
        let err = Agent::builder()
            .system_prompt("{% for %}")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Template(_)));
    }
}

//! The reason-act loop.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            ▼                              │ actions requested
//!      ┌───────────┐   ┌─────────────┐      │
//! ───▶ │ Reasoning │──▶│ Dispatching │──────┘
//!      └─────┬─────┘   └─────────────┘
//!            │ no actions (or step cap reached)
//!            ▼
//!      ┌────────────┐
//!      │ Finalizing │──▶ CompletedTask
//!      └────────────┘
//! ```
//!
//! Steps run strictly one after another; only the actions within a step run
//! concurrently. Any stepper error aborts the task and nothing is committed.

use crate::action::{Action, ActionObservation, Observation};
use crate::error::StepError;
use crate::hooks::AgentHooks;
use crate::state::{AnswerResponse, CompletedTask, ExecutionState, ReasoningResponse, ReasoningStep};
use crate::stepper::{StepOutput, Stepper};
use cairn_tools::ToolRegistry;
use std::sync::Arc;

/// Runs every action concurrently and pairs each with its observation, in
/// the order the actions were given.
pub async fn dispatch_actions(tools: &ToolRegistry, actions: Vec<Action>) -> Vec<ActionObservation> {
    let calls: Vec<_> = actions
        .iter()
        .map(|action| (action.name.clone(), action.tool_args()))
        .collect();
    let observed = tools.dispatch(calls).await;

    actions
        .into_iter()
        .zip(observed)
        .map(|(action, observed)| ActionObservation {
            action,
            observation: Observation { observed },
        })
        .collect()
}

/// Drives one task from query to final answer.
#[derive(Clone)]
pub struct ReActEngine {
    reasoner: Arc<dyn Stepper<ReasoningResponse>>,
    answerer: Arc<dyn Stepper<AnswerResponse>>,
    tools: Arc<ToolRegistry>,
    max_steps: Option<usize>,
}

impl core::fmt::Debug for ReActEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReActEngine")
            .field("tools", &self.tools)
            .field("max_steps", &self.max_steps)
            .finish_non_exhaustive()
    }
}

impl ReActEngine {
    /// Creates an engine with no step cap.
    #[must_use]
    pub fn new(
        reasoner: Arc<dyn Stepper<ReasoningResponse>>,
        answerer: Arc<dyn Stepper<AnswerResponse>>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            reasoner,
            answerer,
            tools,
            max_steps: None,
        }
    }

    /// Caps the number of reasoning steps per task.
    ///
    /// When the cap is hit while the model still wants to act, the engine
    /// finalizes with the steps taken so far. At least one step always runs.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Returns the tools actions are dispatched to.
    #[must_use]
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Runs `task` to completion on top of `history`.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`] from either stepper. Steps taken before
    /// the failure are dropped.
    pub async fn run(
        &self,
        history: &[CompletedTask],
        task: String,
        hooks: &AgentHooks,
    ) -> Result<CompletedTask, StepError> {
        tracing::info!(task_len = task.len(), history = history.len(), "task started");
        let mut state = ExecutionState::new(history, task);

        while self.step(&mut state, hooks).await? {
            if let Some(max) = self.max_steps
                && state.active.steps.len() >= max
            {
                tracing::warn!(max_steps = max, "step cap reached, forcing final answer");
                break;
            }
        }

        let StepOutput { response, raw } = self.answerer.step(&state, hooks).await?;
        tracing::trace!(%raw, "final answer");
        tracing::info!(steps = state.active.steps.len(), "task finished");

        Ok(state.complete(response.response))
    }

    /// Runs one reasoning step, dispatches its actions and appends it to the
    /// active task.
    ///
    /// Returns whether the model requested actions, meaning the loop should continue.
    ///
    /// # Errors
    ///
    /// Returns the reasoning stepper's error unchanged.
    pub async fn step(
        &self,
        state: &mut ExecutionState<'_>,
        hooks: &AgentHooks,
    ) -> Result<bool, StepError> {
        let StepOutput { response, raw } = self.reasoner.step(state, hooks).await?;
        tracing::trace!(%raw, "reasoning step");
        tracing::debug!(
            step = state.active.steps.len() + 1,
            actions = response.actions.len(),
            "reasoning step complete"
        );

        hooks.emit_step_init(&response.reasoning, &response.actions);

        let step = ReasoningStep {
            action_observations: dispatch_actions(&self.tools, response.actions).await,
            reasoning: response.reasoning,
        };

        hooks.emit_step_complete(&step.reasoning, &step.action_observations);

        let proceed = !step.is_terminal();
        state.active.steps.push(step);
        Ok(proceed)
    }
}

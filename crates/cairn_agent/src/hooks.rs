//! Observability callbacks fired by the engine.
//!
//! Hooks are notifications only: they cannot alter the loop, and an unset
//! hook is simply skipped. They run synchronously on the task driving the
//! engine, so they should return quickly.
//!
//! | Hook | Fires |
//! |------|-------|
//! | `on_step_init` | after the model picks actions, before they run |
//! | `on_step_complete` | after every action of a step has an observation |
//! | `on_final_answer_begin` | right before the final-answer model call |
//! | `on_final_answer_chunk` | per streamed fragment of the final answer |
//!
//! Setting `on_final_answer_chunk` switches the final-answer call to streaming.
//!
//! # Example
//!
//! ```
//! use cairn_agent::AgentHooks;
//!
//! let hooks = AgentHooks::new()
//!     .on_step_init(|reasoning, actions| {
//!         tracing::info!(%reasoning, actions = actions.len(), "step");
//!     })
//!     .on_final_answer_chunk(|chunk| print!("{chunk}"));
//! ```

use crate::action::{Action, ActionObservation};
use std::sync::Arc;

/// Called with the reasoning text and the actions about to run.
pub type StepInitHook = Arc<dyn Fn(&str, &[Action]) + Send + Sync>;
/// Called with the reasoning text and each action's observation.
pub type StepCompleteHook = Arc<dyn Fn(&str, &[ActionObservation]) + Send + Sync>;
/// Called once before the final answer is generated.
pub type FinalAnswerBeginHook = Arc<dyn Fn() + Send + Sync>;
/// Called with each streamed fragment of the final answer.
pub type FinalAnswerChunkHook = Arc<dyn Fn(&str) + Send + Sync>;

/// The set of optional callbacks an agent notifies while it works.
#[derive(Clone, Default)]
pub struct AgentHooks {
    step_init: Option<StepInitHook>,
    step_complete: Option<StepCompleteHook>,
    final_answer_begin: Option<FinalAnswerBeginHook>,
    final_answer_chunk: Option<FinalAnswerChunkHook>,
}

impl core::fmt::Debug for AgentHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AgentHooks")
            .field("step_init", &self.step_init.is_some())
            .field("step_complete", &self.step_complete.is_some())
            .field("final_answer_begin", &self.final_answer_begin.is_some())
            .field("final_answer_chunk", &self.final_answer_chunk.is_some())
            .finish()
    }
}

impl AgentHooks {
    /// Creates a set with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook fired before a step's actions are dispatched.
    #[must_use]
    pub fn on_step_init(mut self, hook: impl Fn(&str, &[Action]) + Send + Sync + 'static) -> Self {
        self.step_init = Some(Arc::new(hook));
        self
    }

    /// Sets the hook fired once a step's observations are in.
    #[must_use]
    pub fn on_step_complete(
        mut self,
        hook: impl Fn(&str, &[ActionObservation]) + Send + Sync + 'static,
    ) -> Self {
        self.step_complete = Some(Arc::new(hook));
        self
    }

    /// Sets the hook fired before the final answer is generated.
    #[must_use]
    pub fn on_final_answer_begin(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.final_answer_begin = Some(Arc::new(hook));
        self
    }

    /// Sets the hook fired for each streamed fragment of the final answer.
    #[must_use]
    pub fn on_final_answer_chunk(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.final_answer_chunk = Some(Arc::new(hook));
        self
    }

    pub(crate) fn set_step_init(&mut self, hook: StepInitHook) {
        self.step_init = Some(hook);
    }

    pub(crate) fn set_step_complete(&mut self, hook: StepCompleteHook) {
        self.step_complete = Some(hook);
    }

    pub(crate) fn set_final_answer_begin(&mut self, hook: FinalAnswerBeginHook) {
        self.final_answer_begin = Some(hook);
    }

    pub(crate) fn set_final_answer_chunk(&mut self, hook: FinalAnswerChunkHook) {
        self.final_answer_chunk = Some(hook);
    }

    /// Returns whether the final answer should be streamed.
    #[must_use]
    pub fn streams_final_answer(&self) -> bool {
        self.final_answer_chunk.is_some()
    }

    /// Fires the step-init hook, if set.
    pub fn emit_step_init(&self, reasoning: &str, actions: &[Action]) {
        if let Some(hook) = &self.step_init {
            hook(reasoning, actions);
        }
    }

    /// Fires the step-complete hook, if set.
    pub fn emit_step_complete(&self, reasoning: &str, observations: &[ActionObservation]) {
        if let Some(hook) = &self.step_complete {
            hook(reasoning, observations);
        }
    }

    /// Fires the final-answer-begin hook, if set.
    pub fn emit_final_answer_begin(&self) {
        if let Some(hook) = &self.final_answer_begin {
            hook();
        }
    }

    /// Fires the final-answer-chunk hook, if set.
    pub fn emit_final_answer_chunk(&self, chunk: &str) {
        if let Some(hook) = &self.final_answer_chunk {
            hook(chunk);
        }
    }
}

//! Task state threaded through the reason-act loop.

use crate::action::{Action, ActionObservation};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Structured reply of a reasoning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReasoningResponse {
    /// Your thought process for this step.
    pub reasoning: String,
    /// Tools to call now; leave empty once no further actions are needed.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "Vec<Action>")]
    pub actions: Vec<Action>,
}

/// Structured reply of the final-answer step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerResponse {
    /// The final answer shown to the user.
    pub response: String,
}

/// One iteration of the loop: the model's reasoning and what its actions produced.
///
/// A step without action observations ends the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// The reasoning text.
    pub reasoning: String,
    /// One entry per requested action, in request order.
    pub action_observations: Vec<ActionObservation>,
}

impl ReasoningStep {
    /// Returns whether the model requested no actions in this step.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.action_observations.is_empty()
    }

    /// Returns the step as the model would have produced it.
    #[must_use]
    pub fn to_response(&self) -> ReasoningResponse {
        ReasoningResponse {
            reasoning: self.reasoning.clone(),
            actions: self
                .action_observations
                .iter()
                .map(|ao| ao.action.clone())
                .collect(),
        }
    }
}

/// The task currently being worked on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveTask {
    /// The query being answered.
    pub task: String,
    /// Steps taken so far.
    pub steps: Vec<ReasoningStep>,
}

/// A finished task kept in an agent's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    /// The query that was answered.
    pub task: String,
    /// Every step taken, including the terminal one.
    pub steps: Vec<ReasoningStep>,
    /// The final answer.
    pub response: String,
}

/// Everything a stepper sees: earlier tasks plus the one in progress.
#[derive(Debug, Clone)]
pub struct ExecutionState<'h> {
    /// Completed tasks, oldest first.
    pub history: &'h [CompletedTask],
    /// The task in progress.
    pub active: ActiveTask,
}

impl<'h> ExecutionState<'h> {
    /// Starts a new task on top of `history`.
    #[must_use]
    pub fn new(history: &'h [CompletedTask], task: impl Into<String>) -> Self {
        Self {
            history,
            active: ActiveTask {
                task: task.into(),
                steps: Vec::new(),
            },
        }
    }

    /// Folds the active task into a completed one.
    #[must_use]
    pub fn complete(self, response: impl Into<String>) -> CompletedTask {
        CompletedTask {
            task: self.active.task,
            steps: self.active.steps,
            response: response.into(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

//! Error types for building and running agents.

use cairn_models::llm::{ExtractionError, GenerationError};

/// Errors returned by [`Agent::answer`](crate::Agent::answer).
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A reasoning or final-answer step failed.
    #[error("step failed: {0}")]
    Step(#[from] StepError),

    /// An agent could not be constructed.
    #[error("failed to build agent: {0}")]
    Build(#[from] BuildError),
}

/// Failure of a single model-backed step.
///
/// These are never retried or absorbed; they abort the task in progress.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// The model call failed or its output did not match the expected schema.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The model call failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The state could not be encoded into messages.
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Configuration errors raised while building an agent.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Neither an [`Llm`](cairn_models::llm::Llm) nor both custom steppers were supplied.
    #[error("no model configured")]
    MissingModel,

    /// Two tools share a name.
    #[error("duplicate tool name '{0}'")]
    DuplicateTool(String),

    /// The system prompt template failed to compile or render.
    #[error("invalid system prompt template: {0}")]
    Template(#[from] minijinja::Error),
}

impl From<AgentError> for cairn_tools::ToolError {
    /// A nested agent's failure surfaces to the calling agent as an observation.
    fn from(err: AgentError) -> Self {
        Self::execution_error(err.to_string())
    }
}

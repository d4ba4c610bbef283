//! A reason-act agent runtime.
//!
//! This facade re-exports the Cairn crates:
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`agent`] | `cairn_agent` | The agent, its engine, encoder, steppers, hooks |
//! | [`models`] | `cairn_models` | Model provider contract, `Llm` handle, registry |
//! | [`model_providers`] | `cairn_model_providers` | Concrete providers |
//! | [`tools`] | `cairn_tools` | Tool contract, registry, built-in tools |
//! | [`infra`] | `cairn_core` | Logging setup |

pub use cairn_agent as agent;
pub use cairn_core as infra;
pub use cairn_model_providers as model_providers;
pub use cairn_models as models;
pub use cairn_tools as tools;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use cairn_agent::tools::{AgentFactory, AgentTool, QuickQuestionTool, SubAgentStore};
    pub use cairn_agent::{
        Action, ActionObservation, Agent, AgentBuilder, AgentConfig, AgentError, AgentHooks,
        AnswerFormat, BuildError, CompletedTask, Scenario, StepError,
    };
    pub use cairn_core::{LogFormat, LoggingConfig};
    pub use cairn_models::ModelRegistry;
    pub use cairn_models::llm::{GenerationRequest, Llm, LlmProvider, Message, UsageCounter};
    #[cfg(feature = "openai")]
    pub use cairn_model_providers::OpenAiProvider;
    pub use cairn_tools::{FunctionTool, Tool, ToolArgs, ToolError, ToolRegistry};
}

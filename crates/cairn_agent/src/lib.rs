//! Reason-act agent engine.
//!
//! An [`Agent`] answers a query by looping: the model reasons and picks
//! actions, the actions run concurrently as tools, and their observations
//! feed the next round. When the model picks no actions, a final call
//! produces the answer. Finished tasks stay in the agent's history and are
//! replayed to the model on later queries.
//!
//! # Architecture
//!
//! - **[`action`]**: actions the model requests and what they observed.
//! - **[`state`]**: steps, the active task, completed tasks.
//! - **[`encoder`]**: turns state into model messages.
//! - **[`stepper`]**: one model call in, one structured reply out.
//! - **[`engine`]**: the loop that drives steppers and dispatches tools.
//! - **[`agent`]**: the public facade, history, hooks, and builder.
//! - **[`tools`]**: agents and scenarios exposed as tools.
//!
//! # Example
//!
//! ```no_run
//! use cairn_agent::{Agent, AgentHooks, Scenario};
//! use cairn_tools::builtin::{ListDirectoryTool, ReadFileTool};
//! # async fn run(llm: cairn_models::llm::Llm) -> Result<(), Box<dyn std::error::Error>> {
//!
//! let mut agent = Agent::builder()
//!     .llm(llm)
//!     .personality("You help people find their way around a codebase.")
//!     .tool(ListDirectoryTool)
//!     .tool(ReadFileTool)
//!     .scenario("lost", Scenario::new("The user does not know where to start", ["Begin at the README"]))
//!     .hooks(AgentHooks::new().on_final_answer_chunk(|chunk| print!("{chunk}")))
//!     .build()?;
//!
//! agent.answer("What does this project do?").await?;
//! agent.answer("Where is the entry point?").await?;
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod agent;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod scenario;
pub mod state;
pub mod stepper;
pub mod tools;

pub use action::{Action, ActionArg, ActionObservation, Observation, format_action_args};
pub use agent::{Agent, AgentBuilder};
pub use config::{AgentConfig, AnswerFormat};
pub use encoder::{EncodeMode, StateEncoder};
pub use engine::{ReActEngine, dispatch_actions};
pub use error::{AgentError, BuildError, StepError};
pub use hooks::AgentHooks;
pub use scenario::Scenario;
pub use state::{ActiveTask, AnswerResponse, CompletedTask, ExecutionState, ReasoningResponse, ReasoningStep};
pub use stepper::{AnswerStepper, ReasoningStepper, StepOutput, Stepper};

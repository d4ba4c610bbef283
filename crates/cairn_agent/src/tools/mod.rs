//! Tools backed by agents and agent configuration.
//!
//! A nested agent is just another [`Tool`](cairn_tools::Tool) to the
//! dispatcher. Three shapes are provided:
//!
//! - [`AgentTool`]: a fresh agent per call, queried with the call's arguments as JSON.
//! - [`QuickQuestionTool`]: a fresh agent per call, queried with the `query` argument.
//! - [`CreateSubAgentTool`] / [`ContinueSubAgentTool`]: long-lived nested
//!   agents kept in a [`SubAgentStore`] and addressed by conversation key.
//!
//! [`scenario_tool`] builds the `investigate_scenarios` retriever.

mod agent_tool;
mod quick_question;
mod scenario;
mod subagent;

use crate::agent::Agent;
use crate::error::AgentError;
use std::sync::Arc;

pub use agent_tool::AgentTool;
pub use quick_question::QuickQuestionTool;
pub use scenario::{INVESTIGATE_SCENARIOS, scenario_tool};
pub use subagent::{ContinueSubAgentTool, CreateSubAgentTool, SubAgentKind, SubAgentStore, subagent_tools};

/// Builds a fresh agent on demand.
pub type AgentFactory = Arc<dyn Fn() -> Result<Agent, AgentError> + Send + Sync>;

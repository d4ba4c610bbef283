//! The core [`Tool`] trait for executable tools.

use crate::args::ToolArgs;
use crate::error::ToolError;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Tool::call`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ToolError>> + Send + 'a>>;

/// A tool that can be invoked by an LLM agent.
///
/// Tools are identified purely by [`name`](Tool::name); how they are
/// implemented (a local function, a subprocess, a nested agent) is invisible
/// to the dispatcher. Implementations validate their own arguments and report
/// problems as [`ToolError`]s rather than panicking.
pub trait Tool: Send + Sync + 'static {
    /// Returns the name the model uses to select this tool.
    fn name(&self) -> &str;

    /// Returns the description lines shown to the model.
    fn description(&self) -> Vec<String>;

    /// Runs the tool with the given arguments.
    fn call(&self, args: ToolArgs) -> ToolFuture<'_>;
}

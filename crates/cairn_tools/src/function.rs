//! Closure-backed tools.

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::tool::{Tool, ToolFuture};
use std::future::Future;

/// A [`Tool`] whose behavior is an async closure.
///
/// ```
/// use cairn_tools::{FunctionTool, Tool, ToolArgs, ToolError};
///
/// let echo = FunctionTool::new("echo", ["Returns 'text' unchanged."], |args: ToolArgs| async move {
///     Ok::<_, ToolError>(args.required_str("text")?.to_string())
/// });
/// assert_eq!(echo.name(), "echo");
/// ```
pub struct FunctionTool<F> {
    name: String,
    description: Vec<String>,
    func: F,
}

impl<F, Fut> FunctionTool<F>
where
    F: Fn(ToolArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    /// Creates a tool from a name, description lines and an async function.
    pub fn new(
        name: impl Into<String>,
        description: impl IntoIterator<Item = impl Into<String>>,
        func: F,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into_iter().map(Into::into).collect(),
            func,
        }
    }
}

impl<F> core::fmt::Debug for FunctionTool<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F, Fut> Tool for FunctionTool<F>
where
    F: Fn(ToolArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin((self.func)(args))
    }
}

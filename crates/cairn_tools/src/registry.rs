//! Tool registry and concurrent dispatch.
//!
//! The [`ToolRegistry`] stores tools by unique name. [`ToolRegistry::dispatch`]
//! runs a batch of calls in parallel and returns one observation per call,
//! in call order. Nothing raised inside a tool escapes the dispatcher: an
//! unknown name, a tool error, or a panic all become observation text the
//! model can read and react to.

use crate::args::ToolArgs;
use crate::error::ToolError;
use crate::tool::Tool;
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;

/// Observation returned when no registered tool has the requested name.
pub const NO_SUCH_TOOL: &str = "error: there were no tools available with that name.";

/// Registry of available tools.
///
/// Stores tools by name in registration order and provides lookup and dispatch.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl core::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Registers a tool.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered.
    pub fn register(&mut self, tool: impl Tool) {
        if let Err(err) = self.try_register_arc(Arc::new(tool)) {
            panic!("{err}");
        }
    }

    /// Registers a tool, failing if its name is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn try_register(&mut self, tool: impl Tool) -> Result<(), ToolError> {
        self.try_register_arc(Arc::new(tool))
    }

    /// Registers a shared tool, failing if its name is taken.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if a tool with the same name is
    /// already registered.
    pub fn try_register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Runs every call concurrently and returns one observation per call, in
    /// the same order as `calls`.
    ///
    /// Each call runs on its own task. The returned future completes only
    /// once every call has finished; a failing call never cancels the others.
    /// Observations are:
    /// - the tool's output on success,
    /// - [`NO_SUCH_TOOL`] when the name is unknown,
    /// - `error: <message>` when the tool fails or panics.
    pub async fn dispatch<I>(&self, calls: I) -> Vec<String>
    where
        I: IntoIterator<Item = (String, ToolArgs)>,
    {
        let pending = calls.into_iter().map(|(name, args)| {
            let tool = self.tools.get(&name).cloned();
            async move {
                let Some(tool) = tool else {
                    tracing::debug!(tool = %name, "no tool with requested name");
                    return NO_SUCH_TOOL.to_string();
                };

                tracing::debug!(tool = %name, args = args.len(), "dispatching tool call");
                let handle = tokio::spawn(async move { tool.call(args).await });

                match handle.await {
                    Ok(Ok(output)) => output,
                    Ok(Err(err)) => {
                        tracing::warn!(tool = %name, error = %err, "tool call failed");
                        format!("error: {err}")
                    }
                    Err(err) => {
                        tracing::warn!(tool = %name, error = %err, "tool call did not complete");
                        format!("error: tool '{name}' panicked")
                    }
                }
            }
        });

        join_all(pending).await
    }

    /// Returns a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Returns whether a tool with the given name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns the names of all registered tools.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Iterates over the registered tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.values().map(AsRef::as_ref)
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

use super::AgentFactory;
use cairn_tools::{Tool, ToolArgs, ToolFuture};

/// Exposes an agent as a tool.
///
/// Each call builds a new agent and asks it the call's arguments encoded as
/// a JSON object, so the nested agent never sees earlier calls.
pub struct AgentTool {
    name: String,
    description: Vec<String>,
    factory: AgentFactory,
}

impl core::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl AgentTool {
    /// Creates a tool named `name` that delegates to agents built by `factory`.
    pub fn new(
        name: impl Into<String>,
        description: impl IntoIterator<Item = impl Into<String>>,
        factory: AgentFactory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into_iter().map(Into::into).collect(),
            factory,
        }
    }
}

impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Vec<String> {
        self.description.clone()
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let query = args.to_json()?;
            let mut agent = (self.factory)()?;
            tracing::debug!(tool = %self.name, "delegating to nested agent");
            Ok(agent.answer(query).await?)
        })
    }
}

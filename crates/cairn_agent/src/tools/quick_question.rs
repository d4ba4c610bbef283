use super::AgentFactory;
use cairn_tools::{Tool, ToolArgs, ToolFuture};

/// Asks a brand-new agent a single question.
///
/// Named `agent_<name>`; takes a required `query` string.
pub struct QuickQuestionTool {
    name: String,
    agent_name: String,
    agent_description: String,
    factory: AgentFactory,
}

impl core::fmt::Debug for QuickQuestionTool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuickQuestionTool")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl QuickQuestionTool {
    /// Creates the tool for the agent called `agent_name`.
    pub fn new(
        agent_name: impl Into<String>,
        agent_description: impl Into<String>,
        factory: AgentFactory,
    ) -> Self {
        let agent_name = agent_name.into();
        Self {
            name: format!("agent_{agent_name}"),
            agent_name,
            agent_description: agent_description.into(),
            factory,
        }
    }
}

impl Tool for QuickQuestionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Vec<String> {
        vec![
            format!("Agent: {} - {}", self.agent_name, self.agent_description),
            "Provide 'query' (string) - the question to ask the new agent.".to_string(),
            "This creates a completely new agent instance each time, so there's no conversation history."
                .to_string(),
        ]
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let query = args.required_str("query")?;
            let mut agent = (self.factory)()?;
            Ok(agent.answer(query).await?)
        })
    }
}

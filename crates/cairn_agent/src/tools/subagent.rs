use super::AgentFactory;
use crate::agent::Agent;
use cairn_tools::{Tool, ToolArgs, ToolError, ToolFuture};
use parking_lot::Mutex;
use rand::Rng;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

const KEY_LEN: usize = 10;

/// A kind of sub-agent that `create_subagent` can start.
#[derive(Clone)]
pub struct SubAgentKind {
    /// Builds a new agent of this kind.
    pub factory: AgentFactory,
    /// One-line description shown to the model.
    pub description: String,
}

impl core::fmt::Debug for SubAgentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubAgentKind")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl SubAgentKind {
    /// Creates a sub-agent kind.
    pub fn new(description: impl Into<String>, factory: AgentFactory) -> Self {
        Self {
            factory,
            description: description.into(),
        }
    }
}

/// Live sub-agents keyed by conversation key.
///
/// Clones share the same agents. Each agent sits behind its own async mutex,
/// so two calls into one conversation run one after the other while
/// different conversations proceed in parallel.
#[derive(Clone, Default)]
pub struct SubAgentStore {
    agents: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<Agent>>>>>,
}

impl core::fmt::Debug for SubAgentStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubAgentStore")
            .field("conversations", &self.len())
            .finish()
    }
}

impl SubAgentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.lock().len()
    }

    /// Returns whether no conversation has been started.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.lock().is_empty()
    }

    /// Returns whether `key` names a live conversation.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.agents.lock().contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Arc<tokio::sync::Mutex<Agent>>> {
        self.agents.lock().get(key).cloned()
    }

    /// Stores `agent` under a fresh random key and returns the key.
    fn insert(&self, agent: Agent) -> String {
        let mut agents = self.agents.lock();
        let key = loop {
            let key = random_key();
            if !agents.contains_key(&key) {
                break key;
            }
        };
        agents.insert(key.clone(), Arc::new(tokio::sync::Mutex::new(agent)));
        key
    }
}

fn random_key() -> String {
    let mut rng = rand::rng();
    (0..KEY_LEN)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect()
}

/// Builds the `create_subagent` / `continue_subagent` pair over one store.
pub fn subagent_tools(
    store: SubAgentStore,
    kinds: BTreeMap<String, SubAgentKind>,
) -> (CreateSubAgentTool, ContinueSubAgentTool) {
    (
        CreateSubAgentTool {
            store: store.clone(),
            kinds,
        },
        ContinueSubAgentTool { store },
    )
}

/// Starts a new sub-agent conversation.
///
/// Takes `agent_type` and `initial_query`.
#[derive(Debug)]
pub struct CreateSubAgentTool {
    store: SubAgentStore,
    kinds: BTreeMap<String, SubAgentKind>,
}

impl Tool for CreateSubAgentTool {
    fn name(&self) -> &str {
        "create_subagent"
    }

    fn description(&self) -> Vec<String> {
        let mut lines = vec![
            "Create a new subagent of the given type.".to_string(),
            "You may create as many agents (of the same or different types) as you wish.".to_string(),
            "You must provide an `agent_type` string, and an `initial_query` string.".to_string(),
            "Allowed types are:".to_string(),
        ];
        lines.extend(
            self.kinds
                .iter()
                .map(|(name, kind)| format!("`{name}`: {}", kind.description)),
        );
        lines
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let agent_type = args.required_str("agent_type")?;
            let initial_query = args.required_str("initial_query")?;

            let kind = self.kinds.get(agent_type).ok_or_else(|| {
                ToolError::parameter_error(format!("unknown agent_type: {agent_type}"))
            })?;

            let mut agent = (kind.factory)()?;
            let answer = agent.answer(initial_query).await?;
            let key = self.store.insert(agent);
            tracing::debug!(%agent_type, %key, "subagent created");

            Ok(format!(
                "Created subagent with conversation key '{key}'. It responded:\n\n{answer}"
            ))
        })
    }
}

/// Sends a follow-up query to an existing sub-agent.
///
/// Takes `conversation_id` and `follow_up_query`.
#[derive(Debug)]
pub struct ContinueSubAgentTool {
    store: SubAgentStore,
}

impl Tool for ContinueSubAgentTool {
    fn name(&self) -> &str {
        "continue_subagent"
    }

    fn description(&self) -> Vec<String> {
        vec![
            "Continue a conversation with an existing subagent.".to_string(),
            "Provide 'conversation_id' (string) and 'follow_up_query' (string).".to_string(),
        ]
    }

    fn call(&self, args: ToolArgs) -> ToolFuture<'_> {
        Box::pin(async move {
            let conversation_id = args.required_str("conversation_id")?;
            let follow_up_query = args.required_str("follow_up_query")?;

            let agent = self.store.get(conversation_id).ok_or_else(|| {
                ToolError::parameter_error(format!(
                    "no subagent found for conversation_id: {conversation_id}"
                ))
            })?;

            let answer = agent.lock().await.answer(follow_up_query).await?;
            Ok(format!("Subagent '{conversation_id}' responded:\n\n{answer}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_ten_lowercase_letters() {
        for _ in 0..50 {
            let key = random_key();
            assert_eq!(key.len(), KEY_LEN);
            assert!(key.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }
}

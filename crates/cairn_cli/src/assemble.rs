//! Turns configuration files into live agents.

use crate::config::{AgentFile, ConfigError, ModelsFile};
use cairn_agent::tools::{AgentFactory, AgentTool};
use cairn_agent::{Agent, AgentConfig, AgentError, AnswerFormat};
use cairn_model_providers::OpenAiProvider;
use cairn_models::ModelRegistry;
use cairn_models::llm::{Llm, UsageCounter};
use cairn_tools::Tool;
use cairn_tools::builtin::{ListDirectoryTool, ReadFileTool, TimeTool};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The configured models, one provider per entry, sharing a usage counter.
#[derive(Debug)]
pub struct ModelCatalog {
    registry: ModelRegistry,
    names: BTreeMap<String, String>,
    usage: UsageCounter,
}

impl ModelCatalog {
    /// Registers a provider for every entry of `file`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] for an entry with no usable key.
    pub fn from_file(file: &ModelsFile) -> Result<Self, ConfigError> {
        let usage = UsageCounter::new();
        let mut registry = ModelRegistry::new().with_usage_counter(usage.clone());
        let mut names = BTreeMap::new();

        for (model, entry) in &file.models {
            let mut provider = OpenAiProvider::new(entry.api_key(model)?);
            if !entry.url.is_empty() {
                provider = provider.with_base_url(&entry.url);
            }
            tracing::debug!(%model, base_url = provider.base_url(), name = %entry.name, "model registered");
            registry.register(model.clone(), Arc::new(provider));
            names.insert(model.clone(), entry.name.clone());
        }

        Ok(Self {
            registry,
            names,
            usage,
        })
    }

    /// Returns a handle to the model configured under `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModel`] if no such entry exists.
    pub fn llm(&self, model: &str) -> Result<Llm, ConfigError> {
        let name = self
            .names
            .get(model)
            .ok_or_else(|| ConfigError::UnknownModel(model.to_string()))?;
        Ok(self.registry.llm(format!("{model}/{name}"))?)
    }

    /// Returns the counter every model call is recorded in.
    #[must_use]
    pub fn usage(&self) -> &UsageCounter {
        &self.usage
    }
}

/// Builds a factory for the agent described by `file`.
///
/// Tools, including sub-agent tools, are created once and shared by every
/// agent the factory builds. Sub-agents always give structured answers;
/// `format` applies to this agent only. The factory is tried once here so
/// configuration errors surface immediately.
///
/// # Errors
///
/// Fails on an unknown model or an agent that cannot be built.
pub fn agent_factory(
    catalog: &ModelCatalog,
    file: &AgentFile,
    format: AnswerFormat,
) -> Result<AgentFactory, ConfigError> {
    let llm = catalog.llm(&file.model_name)?;

    let mut tools: Vec<Arc<dyn Tool>> = vec![Arc::new(TimeTool)];
    if file.view_files {
        tools.push(Arc::new(ListDirectoryTool));
        tools.push(Arc::new(ReadFileTool));
    }
    for sub in &file.sub_agents {
        let factory = agent_factory(catalog, sub, AnswerFormat::Structured)?;
        tools.push(Arc::new(AgentTool::new(
            &sub.agent_name,
            sub.agent_description.clone(),
            factory,
        )));
    }

    let config = AgentConfig {
        personality: file.personality.clone(),
        scenarios: file.scenarios.clone(),
        answer_format: format,
        max_steps: file.max_steps,
        ..AgentConfig::default()
    };

    let factory: AgentFactory = Arc::new(move || {
        Ok::<_, AgentError>(
            Agent::builder()
                .llm(llm.clone())
                .config(config.clone())
                .tools(tools.iter().cloned())
                .build()?,
        )
    });

    factory()?;

    Ok(factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelEntry;

    fn catalog() -> ModelCatalog {
        let file = ModelsFile {
            models: BTreeMap::from([(
                "fast".to_string(),
                ModelEntry {
                    url: "http://localhost:9/v1".to_string(),
                    name: "tiny".to_string(),
                    key: "sk-test".to_string(),
                },
            )]),
        };
        ModelCatalog::from_file(&file).unwrap()
    }

    #[test]
    fn resolves_configured_model() {
        let llm = catalog().llm("fast").unwrap();
        assert_eq!(llm.model_name(), "tiny");
    }

    #[test]
    fn unknown_model_is_reported() {
        let err = catalog().llm("slow").unwrap_err();
        assert_eq!(err.to_string(), "could not find model for 'slow'");
    }

    #[test]
    fn sub_agents_become_tools() {
        let file = AgentFile {
            model_name: "fast".to_string(),
            view_files: true,
            sub_agents: vec![AgentFile {
                agent_name: "researcher".to_string(),
                agent_description: vec!["Finds things.".to_string()],
                model_name: "fast".to_string(),
                ..AgentFile::default()
            }],
            ..AgentFile::default()
        };

        let factory = agent_factory(&catalog(), &file, AnswerFormat::PlainText).unwrap();
        let agent = factory().unwrap();

        assert_eq!(
            agent.tools().names(),
            ["get_time", "list_directory", "read_file", "researcher"]
        );
    }

    #[test]
    fn clashing_sub_agent_name_fails_early() {
        let file = AgentFile {
            model_name: "fast".to_string(),
            sub_agents: vec![AgentFile {
                agent_name: "get_time".to_string(),
                model_name: "fast".to_string(),
                ..AgentFile::default()
            }],
            ..AgentFile::default()
        };

        match agent_factory(&catalog(), &file, AnswerFormat::Structured) {
            Err(ConfigError::Agent(AgentError::Build(_))) => {}
            Err(other) => panic!("expected a build error, got {other:?}"),
            Ok(_) => panic!("clashing tool names were accepted"),
        }
    }
}

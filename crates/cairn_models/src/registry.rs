//! Named model providers.

use crate::error::ModelLookupError;
use crate::llm::{Llm, LlmProvider, UsageCounter};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Providers by name, resolving `provider/model` identifiers to [`Llm`] handles.
///
/// Everything after the first `/` is the model name, so model names may
/// themselves contain slashes.
///
/// ```
/// # use cairn_models::ModelRegistry;
/// # use cairn_models::llm::{LlmProvider, GenerationRequest, GenerationResponse, GenerationError};
/// # use async_trait::async_trait;
/// # use std::sync::Arc;
/// # struct Local;
/// # #[async_trait]
/// # impl LlmProvider for Local {
/// #   async fn generate(&self, _model: &str, _request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
/// #     Ok(GenerationResponse::text_only(""))
/// #   }
/// # }
/// let mut registry = ModelRegistry::new();
/// registry.register("local", Arc::new(Local));
///
/// let llm = registry.llm("local/qwen/qwen3-8b").unwrap();
/// assert_eq!(llm.model_name(), "qwen/qwen3-8b");
/// ```
#[derive(Clone, Default)]
pub struct ModelRegistry {
    providers: BTreeMap<String, Arc<dyn LlmProvider>>,
    usage: Option<UsageCounter>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("providers", &self.provider_names())
            .field("counts_usage", &self.usage.is_some())
            .finish()
    }
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every handle returned by [`llm`](Self::llm) record into `counter`.
    #[must_use]
    pub fn with_usage_counter(mut self, counter: UsageCounter) -> Self {
        self.usage = Some(counter);
        self
    }

    /// Registers `provider` as `name`, returning any provider it replaces.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        provider: Arc<dyn LlmProvider>,
    ) -> Option<Arc<dyn LlmProvider>> {
        let name = name.into();
        let replaced = self.providers.insert(name.clone(), provider);
        if replaced.is_some() {
            tracing::warn!(provider = %name, "model provider replaced");
        }
        replaced
    }

    /// Resolves a `provider/model` identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLookupError`] if the identifier is malformed or names
    /// an unregistered provider.
    pub fn llm(&self, model_id: impl AsRef<str>) -> Result<Llm, ModelLookupError> {
        let model_id = model_id.as_ref();
        let Some((provider, model)) = model_id.split_once('/') else {
            return Err(ModelLookupError::MalformedId(model_id.to_string()));
        };
        let provider = self
            .provider(provider)
            .ok_or_else(|| ModelLookupError::UnknownProvider(provider.to_string()))?;

        let llm = Llm::new(provider, model);
        Ok(match &self.usage {
            Some(counter) => llm.with_usage_counter(counter.clone()),
            None => llm,
        })
    }

    /// Returns the provider registered as `name`.
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(name).cloned()
    }

    /// Returns whether a provider is registered as `name`.
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Returns the registered provider names in sorted order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

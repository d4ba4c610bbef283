//! `OpenAI`-compatible provider backend.
//!
//! Uses the Chat Completions API through `async-openai`. The same API is
//! served by many self-hosted and third-party inference servers.
//!
//! ```no_run
//! # use cairn_model_providers::openai::OpenAiProvider;
//! # use cairn_models::ModelRegistry;
//! # use std::sync::Arc;
//! # let mut registry = ModelRegistry::new();
//! registry.register("openai", Arc::new(OpenAiProvider::new("sk-...")));
//! ```

mod provider;

pub use provider::OpenAiProvider;

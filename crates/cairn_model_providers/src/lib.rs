//! Model provider backends for Cairn.
//!
//! Each provider implements [`LlmProvider`](cairn_models::llm::LlmProvider) and is
//! registered with a [`ModelRegistry`](cairn_models::ModelRegistry) under a name,
//! allowing standardized access to different model backends.
//!
//! # Supported Providers
//!
//! | Provider | Feature Flag | Description |
//! |----------|--------------|-------------|
//! | `OpenAI`-compatible | `openai` (default) | Chat Completions API at any base URL |
//!
//! # Usage
//!
//! ```no_run
//! # #[cfg(feature = "openai")]
//! # {
//! use cairn_model_providers::OpenAiProvider;
//! use cairn_models::ModelRegistry;
//! use std::sync::Arc;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register("openai", Arc::new(OpenAiProvider::from_env("OPENAI_API_KEY").unwrap()));
//! let llm = registry.llm("openai/gpt-4o-mini").unwrap();
//! # }
//! ```
//!
//! Self-hosted servers that speak the same protocol are reached by overriding
//! the base URL:
//!
//! ```no_run
//! # #[cfg(feature = "openai")]
//! # {
//! use cairn_model_providers::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("unused").with_base_url("http://localhost:11434/v1");
//! # }
//! ```

#[cfg(feature = "openai")]
mod schema;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;

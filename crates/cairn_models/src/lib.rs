//! Model provider interface and registry for Cairn.
//!
//! Provides a unified interface for language model access, decoupling the agent
//! core from provider implementations.
//!
//! # Overview
//!
//! - Provider-agnostic: the agent depends only on this crate, never on a
//!   specific backend.
//!
//! - Runtime registration: provider crates register an [`LlmProvider`](llm::LlmProvider)
//!   under a name, and models are addressed as `provider/model`.
//!
//! - Structured output: [`Llm::generate_structured`](llm::Llm::generate_structured)
//!   derives a JSON schema with `schemars` and decodes the reply into a typed value.
//!
//! # Example
//!
//! ```ignore
//! use cairn_models::ModelRegistry;
//! use cairn_models::llm::{GenerationRequest, Message};
//!
//! let llm = registry.llm("openai/gpt-4o")?;
//!
//! let request = GenerationRequest::new(vec![
//!     Message::system("You are helpful"),
//!     Message::user("Hello!"),
//! ]);
//! let response = llm.generate(request).await?;
//! ```

pub mod error;
pub mod llm;
mod registry;

pub use registry::ModelRegistry;

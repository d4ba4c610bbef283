//! LLM (Large Language Model) generation capabilities.
//!
//! This module provides the core traits and types for text generation
//! with LLMs, including support for:
//!
//! - Role-tagged conversations
//! - Structured outputs
//! - Incremental (streamed) text delivery

mod error;
mod model;
mod provider;
mod types;
mod usage;

pub use error::{ExtractionError, GenerationError};
pub use model::{Extracted, Llm};
pub use provider::{ChunkSink, LlmProvider};
pub use types::{GenerationRequest, GenerationResponse, Message, Role, Usage};
pub use usage::UsageCounter;

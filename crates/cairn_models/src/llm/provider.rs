//! The [`LlmProvider`] trait for LLM model providers.

use super::error::GenerationError;
use super::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;

/// Receiver for incremental text produced while a response is generated.
pub type ChunkSink<'a> = dyn FnMut(&str) + Send + 'a;

/// Trait implemented by LLM providers for text generation.
///
/// Provider crates implement this trait to handle generation requests.
#[async_trait]
pub trait LlmProvider: Send + Sync + 'static {
    /// Sends a generation request to the provider.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name on which to perform generation
    /// * `request` - The generation request
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Sends a generation request, forwarding text to `sink` as it arrives.
    ///
    /// The returned response always carries the complete text. Providers
    /// without native streaming use the default, which emits the full text
    /// as a single chunk once generation finishes.
    async fn generate_streaming(
        &self,
        model: &str,
        request: GenerationRequest,
        sink: &mut ChunkSink<'_>,
    ) -> Result<GenerationResponse, GenerationError> {
        let response = self.generate(model, request).await?;
        if !response.text().is_empty() {
            sink(response.text());
        }
        Ok(response)
    }
}

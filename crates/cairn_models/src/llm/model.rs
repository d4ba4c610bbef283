//! LLM handle for generation requests.

use super::error::{ExtractionError, GenerationError};
use super::provider::{ChunkSink, LlmProvider};
use super::types::{GenerationRequest, GenerationResponse};
use super::usage::UsageCounter;
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// An LLM handle for making generation requests.
///
/// Usually created via [`ModelRegistry::llm()`](crate::ModelRegistry::llm).
#[derive(Clone)]
pub struct Llm {
    provider: Arc<dyn LlmProvider>,
    model: String,
    usage: Option<UsageCounter>,
}

impl core::fmt::Debug for Llm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Llm").field("model", &self.model).finish()
    }
}

/// A decoded structured reply together with the raw text it was decoded from.
#[derive(Debug, Clone)]
pub struct Extracted<T> {
    /// The decoded value.
    pub value: T,
    /// The model's raw output.
    pub raw: String,
}

impl Llm {
    /// Creates a new LLM handle from provider and model name.
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            usage: None,
        }
    }

    /// Records the usage of every request made through this handle in `counter`.
    #[must_use]
    pub fn with_usage_counter(mut self, counter: UsageCounter) -> Self {
        self.usage = Some(counter);
        self
    }

    /// Sends a generation request to the model.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the request fails.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let response = self.provider.generate(&self.model, request).await?;
        self.record(&response);
        Ok(response)
    }

    /// Sends a generation request, forwarding text chunks to `sink` as they arrive.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the request fails.
    pub async fn generate_streaming(
        &self,
        request: GenerationRequest,
        sink: &mut ChunkSink<'_>,
    ) -> Result<GenerationResponse, GenerationError> {
        let response = self
            .provider
            .generate_streaming(&self.model, request, sink)
            .await?;
        self.record(&response);
        Ok(response)
    }

    /// Sends a generation request with structured output.
    ///
    /// This method automatically injects the JSON schema for type `T` into the request
    /// and parses the response into the specified type.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if:
    /// - The generation request fails
    /// - No text content is found in the response
    /// - The response cannot be parsed as type `T`
    pub async fn generate_structured<T: JsonSchema + DeserializeOwned>(
        &self,
        request: GenerationRequest,
    ) -> Result<T, ExtractionError> {
        self.extract(request, None).await.map(|out| out.value)
    }

    /// Sends a structured-output request and returns both the decoded value
    /// and the raw text, optionally streaming chunks to `sink`.
    ///
    /// # Errors
    ///
    /// Fails in the same cases as [`generate_structured`](Self::generate_structured).
    pub async fn extract<T: JsonSchema + DeserializeOwned>(
        &self,
        mut request: GenerationRequest,
        sink: Option<&mut ChunkSink<'_>>,
    ) -> Result<Extracted<T>, ExtractionError> {
        // Inject schema into request
        let schema = schema_for!(T);
        request.output_schema = Some(
            serde_json::to_value(schema)
                .map_err(|err| ExtractionError::Schema(err.to_string()))?,
        );

        let response = match sink {
            Some(sink) => self.generate_streaming(request, sink).await?,
            None => self.generate(request).await?,
        };

        let raw = response.content;
        if raw.trim().is_empty() {
            return Err(ExtractionError::Empty);
        }

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Extracted { value, raw }),
            Err(source) => Err(ExtractionError::Malformed { raw, source }),
        }
    }

    /// Returns the model name (without provider prefix).
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn record(&self, response: &GenerationResponse) {
        if let Some(counter) = &self.usage {
            counter.record(&response.usage);
        }
        tracing::debug!(
            model = %self.model,
            input_tokens = ?response.usage.input_tokens,
            output_tokens = ?response.usage.output_tokens,
            "model call complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Message, Usage};
    use async_trait::async_trait;
    use serde::Deserialize;

    struct Canned(&'static str);

    #[async_trait]
    impl LlmProvider for Canned {
        async fn generate(
            &self,
            _model: &str,
            request: GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            assert!(request.output_schema.is_some(), "schema must be injected");
            Ok(GenerationResponse {
                content: self.0.to_string(),
                usage: Usage {
                    input_tokens: Some(3),
                    output_tokens: Some(2),
                    total_tokens: Some(5),
                },
            })
        }
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Reply {
        response: String,
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new(vec![Message::user("hi")])
    }

    #[tokio::test]
    async fn extract_decodes_and_keeps_raw() {
        let counter = UsageCounter::new();
        let llm = Llm::new(Arc::new(Canned(r#"{"response":"ok"}"#)), "m")
            .with_usage_counter(counter.clone());

        let out = llm.extract::<Reply>(request(), None).await.unwrap();
        assert_eq!(out.value.response, "ok");
        assert_eq!(out.raw, r#"{"response":"ok"}"#);
        assert_eq!(counter.calls(), 1);
    }

    #[tokio::test]
    async fn extract_streams_through_default_provider_impl() {
        let llm = Llm::new(Arc::new(Canned(r#"{"response":"ok"}"#)), "m");
        let mut chunks = Vec::new();
        let mut sink = |chunk: &str| chunks.push(chunk.to_string());

        llm.extract::<Reply>(request(), Some(&mut sink)).await.unwrap();
        assert_eq!(chunks, vec![r#"{"response":"ok"}"#.to_string()]);
    }

    #[tokio::test]
    async fn empty_reply_is_no_content() {
        let llm = Llm::new(Arc::new(Canned("  ")), "m");
        let err = llm.generate_structured::<Reply>(request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[tokio::test]
    async fn malformed_reply_is_deserialization_error() {
        let llm = Llm::new(Arc::new(Canned("not json")), "m");
        let err = llm.generate_structured::<Reply>(request()).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed { ref raw, .. } if raw == "not json"));
    }
}

//! `OpenAI`-compatible [`LlmProvider`] implementation using the Chat Completions API.

use crate::schema::normalize_output_schema;
use async_openai::config::{OPENAI_API_BASE, OpenAIConfig};
use async_openai::error::{ApiError, OpenAIError};
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionStreamOptions, CompletionUsage, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat,
    ResponseFormatJsonSchema,
};
use async_trait::async_trait;
use cairn_models::llm::{
    ChunkSink, GenerationError, GenerationRequest, GenerationResponse, LlmProvider, Message,
    Role, Usage,
};
use futures::StreamExt;

/// Codes and types the API uses for rejected credentials.
const AUTH_ERRORS: &[&str] = &["invalid_api_key", "authentication_error", "permission_error"];

/// Codes and types the API uses when the caller must slow down.
const RATE_LIMIT_ERRORS: &[&str] = &["rate_limit_exceeded", "insufficient_quota", "requests", "tokens"];

/// `OpenAI`-compatible [`LlmProvider`] implementation.
///
/// Talks to `{base_url}/chat/completions`, so any server speaking that
/// protocol can stand in for the public endpoint.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: async_openai::Client<OpenAIConfig>,
    config: OpenAIConfig,
    base_url: String,
}

impl OpenAiProvider {
    /// Creates a new provider against the public `OpenAI` endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: async_openai::Client::with_config(config.clone()),
            config,
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    /// Creates a provider with the API key read from the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Auth`] if the variable is unset or not valid unicode.
    pub fn from_env(var: &str) -> Result<Self, GenerationError> {
        let key = std::env::var(var)
            .map_err(|err| GenerationError::Auth(format!("{var}: {err}")))?;
        Ok(Self::new(key))
    }

    /// Points the provider at another server speaking the same protocol.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self.config = self.config.with_api_base(self.base_url.clone());
        self.client = async_openai::Client::with_config(self.config.clone());
        self
    }

    /// Returns the API root requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl core::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let chat_request = convert_request(model, request, false)?;
        tracing::trace!(base_url = %self.base_url, model, "sending chat completion request");

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(convert_error)?;
        convert_response(response)
    }

    async fn generate_streaming(
        &self,
        model: &str,
        request: GenerationRequest,
        sink: &mut ChunkSink<'_>,
    ) -> Result<GenerationResponse, GenerationError> {
        let chat_request = convert_request(model, request, true)?;
        tracing::trace!(base_url = %self.base_url, model, "streaming chat completion request");

        let mut stream = self
            .client
            .chat()
            .create_stream(chat_request)
            .await
            .map_err(convert_error)?;

        let mut content = String::new();
        let mut refusal = String::new();
        let mut usage = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(convert_error)?;
            if let Some(reported) = chunk.usage {
                usage = Some(reported);
            }
            for choice in chunk.choices {
                if let Some(text) = choice.delta.content
                    && !text.is_empty()
                {
                    sink(&text);
                    content.push_str(&text);
                }
                if let Some(text) = choice.delta.refusal {
                    refusal.push_str(&text);
                }
            }
        }

        if content.is_empty() && !refusal.is_empty() {
            return Err(GenerationError::Refusal(refusal));
        }

        Ok(GenerationResponse {
            content,
            usage: usage.map(convert_usage).unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request conversion (Cairn -> OpenAI)
// ---------------------------------------------------------------------------

fn convert_request(
    model: &str,
    request: GenerationRequest,
    stream: bool,
) -> Result<CreateChatCompletionRequest, GenerationError> {
    let messages = request
        .messages
        .into_iter()
        .map(convert_message)
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid_request)?;

    let mut builder = CreateChatCompletionRequestArgs::default();
    builder.model(model).messages(messages);

    if let Some(schema) = request.output_schema {
        builder.response_format(ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                name: "response".to_string(),
                description: None,
                schema: Some(normalize_output_schema(schema)),
                strict: Some(false),
            },
        });
    }
    if let Some(max_tokens) = request.max_tokens {
        builder.max_completion_tokens(max_tokens);
    }
    if stream {
        builder.stream(true);
        if let Some(options) = usage_in_stream() {
            builder.stream_options(options);
        }
    }

    builder.build().map_err(invalid_request)
}

fn convert_message(message: Message) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    Ok(match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content)
            .build()?
            .into(),
    })
}

/// Asks for a trailing chunk that reports token usage.
fn usage_in_stream() -> Option<ChatCompletionStreamOptions> {
    serde_json::from_value(serde_json::json!({ "include_usage": true })).ok()
}

fn invalid_request(err: OpenAIError) -> GenerationError {
    GenerationError::InvalidRequest(format!("Failed to build chat completion request: {err}"))
}

// ---------------------------------------------------------------------------
// Response conversion (OpenAI -> Cairn)
// ---------------------------------------------------------------------------

fn convert_response(
    response: CreateChatCompletionResponse,
) -> Result<GenerationResponse, GenerationError> {
    let usage = response.usage.map(convert_usage).unwrap_or_default();

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| GenerationError::InvalidResponse("response has no choices".to_string()))?;

    match (message.content, message.refusal) {
        (Some(content), _) if !content.is_empty() => Ok(GenerationResponse { content, usage }),
        (_, Some(refusal)) => Err(GenerationError::Refusal(refusal)),
        _ => Ok(GenerationResponse {
            content: String::new(),
            usage,
        }),
    }
}

fn convert_usage(usage: CompletionUsage) -> Usage {
    Usage {
        input_tokens: Some(u64::from(usage.prompt_tokens)),
        output_tokens: Some(u64::from(usage.completion_tokens)),
        total_tokens: Some(u64::from(usage.total_tokens)),
    }
}

// ---------------------------------------------------------------------------
// Error conversion
// ---------------------------------------------------------------------------

fn convert_error(err: OpenAIError) -> GenerationError {
    match err {
        OpenAIError::ApiError(api_err) => convert_api_error(api_err),
        OpenAIError::Reqwest(ref reqwest_err) => match reqwest_err.status() {
            Some(status) if matches!(status.as_u16(), 401 | 403) => {
                GenerationError::Auth(err.to_string())
            }
            Some(status) if status.as_u16() == 429 => {
                GenerationError::RateLimited { retry_after: None }
            }
            _ => GenerationError::Transport(err.to_string()),
        },
        OpenAIError::JSONDeserialize(serde_err, _) => GenerationError::Json(serde_err),
        OpenAIError::InvalidArgument(msg) => GenerationError::InvalidRequest(msg),
        other => GenerationError::Transport(other.to_string()),
    }
}

fn convert_api_error(err: ApiError) -> GenerationError {
    let matches_any = |names: &[&str]| {
        [err.code.as_deref(), err.r#type.as_deref()]
            .into_iter()
            .flatten()
            .any(|value| names.contains(&value))
    };

    if matches_any(AUTH_ERRORS) {
        GenerationError::Auth(err.message)
    } else if matches_any(RATE_LIMIT_ERRORS) {
        GenerationError::RateLimited { retry_after: None }
    } else {
        GenerationError::Api {
            code: err.code.or(err.r#type),
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn api_error(value: Value) -> ApiError {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_carries_roles_and_normalized_schema() {
        let request = GenerationRequest::new(vec![
            Message::system("sys"),
            Message::user("hi"),
            Message::assistant("{}"),
        ])
        .output_schema(json!({"title": "R", "type": "object", "properties": {}}));

        let body = serde_json::to_value(convert_request("gpt", request, false).unwrap()).unwrap();

        assert_eq!(body["model"], "gpt");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["messages"][2]["role"], "assistant");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], false);
        let schema = &body["response_format"]["json_schema"]["schema"];
        assert!(schema.get("title").is_none());
        assert_eq!(schema["additionalProperties"], false);
        assert!(body.get("stream_options").is_none());
    }

    #[test]
    fn streaming_request_asks_for_usage() {
        let request = GenerationRequest::new(vec![Message::user("hi")]);
        let body = serde_json::to_value(convert_request("gpt", request, true).unwrap()).unwrap();

        assert_eq!(body["stream"], true);
        assert_eq!(body["stream_options"]["include_usage"], true);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn refusal_without_content_is_an_error() {
        let response: CreateChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 0,
            "model": "gpt",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": null, "refusal": "no"},
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        let err = convert_response(response).unwrap_err();
        assert!(matches!(err, GenerationError::Refusal(msg) if msg == "no"));
    }

    #[test]
    fn api_errors_map_by_code_and_type() {
        let auth = convert_api_error(api_error(json!({
            "message": "Incorrect API key provided",
            "type": "invalid_request_error",
            "param": null,
            "code": "invalid_api_key"
        })));
        assert!(matches!(auth, GenerationError::Auth(msg) if msg.contains("API key")));

        let quota = convert_api_error(api_error(json!({
            "message": "You exceeded your current quota",
            "type": "insufficient_quota",
            "param": null,
            "code": null
        })));
        assert!(matches!(quota, GenerationError::RateLimited { retry_after: None }));

        let other = convert_api_error(api_error(json!({
            "message": "The model does not exist",
            "type": "invalid_request_error",
            "param": null,
            "code": "model_not_found"
        })));
        assert!(matches!(
            other,
            GenerationError::Api { code: Some(ref code), .. } if code == "model_not_found"
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenAiProvider::new("k").with_base_url("http://localhost:8080/v1/");
        assert_eq!(provider.base_url(), "http://localhost:8080/v1");
    }
}

#![allow(dead_code, reason = "each test binary uses a different subset")]

use async_trait::async_trait;
use cairn_models::llm::{
    ChunkSink, GenerationError, GenerationRequest, GenerationResponse, Llm, LlmProvider, Message,
    Usage,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A provider that replays canned replies in order and records every request.
///
/// Streaming splits each reply after every space.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = impl Into<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            requests: Mutex::default(),
        })
    }

    pub fn push(&self, reply: impl Into<String>) {
        self.replies.lock().push_back(reply.into());
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn request(&self, index: usize) -> Vec<Message> {
        self.requests.lock()[index].messages.clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }

    pub fn llm(self: &Arc<Self>) -> Llm {
        Llm::new(self.clone(), "scripted")
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(
        &self,
        _model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.requests.lock().push(request);
        let content = self
            .replies
            .lock()
            .pop_front()
            .ok_or_else(|| GenerationError::InvalidResponse("script exhausted".to_string()))?;
        Ok(GenerationResponse {
            usage: Usage {
                input_tokens: Some(10),
                output_tokens: Some(content.len() as u64),
                total_tokens: None,
            },
            content,
        })
    }

    async fn generate_streaming(
        &self,
        model: &str,
        request: GenerationRequest,
        sink: &mut ChunkSink<'_>,
    ) -> Result<GenerationResponse, GenerationError> {
        let response = self.generate(model, request).await?;
        for piece in response.content.split_inclusive(' ') {
            sink(piece);
        }
        Ok(response)
    }
}

/// A reasoning reply with no actions.
pub fn done(reasoning: &str) -> String {
    serde_json::json!({ "reasoning": reasoning, "actions": [] }).to_string()
}

/// A structured final answer.
pub fn answer(text: &str) -> String {
    serde_json::json!({ "response": text }).to_string()
}

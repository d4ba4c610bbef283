//! Single model-backed steps.
//!
//! A [`Stepper`] turns the current [`ExecutionState`] into one structured
//! reply. The engine uses two: one for reasoning steps and one for the final
//! answer. Both share a [`StateEncoder`] and differ only in encoding mode,
//! expected reply type, and streaming.

use crate::config::AnswerFormat;
use crate::encoder::{EncodeMode, StateEncoder};
use crate::error::StepError;
use crate::hooks::AgentHooks;
use crate::state::{AnswerResponse, ExecutionState, ReasoningResponse};
use async_trait::async_trait;
use cairn_models::llm::{ChunkSink, GenerationRequest, Llm};
use std::sync::Arc;

/// A decoded reply and the raw model text it came from.
#[derive(Debug, Clone)]
pub struct StepOutput<T> {
    /// The decoded reply.
    pub response: T,
    /// The model's raw output.
    pub raw: String,
}

/// One opaque "state in, structured reply out" unit of work.
///
/// Errors are returned unchanged; steppers do not retry.
#[async_trait]
pub trait Stepper<T>: Send + Sync {
    /// Produces the next reply for `state`.
    ///
    /// `hooks` carries the streaming callbacks; steppers that do not stream ignore it.
    async fn step(
        &self,
        state: &ExecutionState<'_>,
        hooks: &AgentHooks,
    ) -> Result<StepOutput<T>, StepError>;
}

/// Asks the model for reasoning and the next actions.
#[derive(Debug, Clone)]
pub struct ReasoningStepper {
    encoder: Arc<StateEncoder>,
    llm: Llm,
}

impl ReasoningStepper {
    /// Creates a reasoning stepper.
    #[must_use]
    pub fn new(encoder: Arc<StateEncoder>, llm: Llm) -> Self {
        Self { encoder, llm }
    }
}

#[async_trait]
impl Stepper<ReasoningResponse> for ReasoningStepper {
    async fn step(
        &self,
        state: &ExecutionState<'_>,
        _hooks: &AgentHooks,
    ) -> Result<StepOutput<ReasoningResponse>, StepError> {
        let messages = self.encoder.encode(state, EncodeMode::Reasoning)?;
        let extracted = self
            .llm
            .extract::<ReasoningResponse>(GenerationRequest::new(messages), None)
            .await?;

        Ok(StepOutput {
            response: extracted.value,
            raw: extracted.raw,
        })
    }
}

/// Asks the model for the final answer, streaming it when a chunk hook is set.
#[derive(Debug, Clone)]
pub struct AnswerStepper {
    encoder: Arc<StateEncoder>,
    llm: Llm,
    format: AnswerFormat,
}

impl AnswerStepper {
    /// Creates a final-answer stepper.
    #[must_use]
    pub fn new(encoder: Arc<StateEncoder>, llm: Llm, format: AnswerFormat) -> Self {
        Self {
            encoder,
            llm,
            format,
        }
    }
}

#[async_trait]
impl Stepper<AnswerResponse> for AnswerStepper {
    async fn step(
        &self,
        state: &ExecutionState<'_>,
        hooks: &AgentHooks,
    ) -> Result<StepOutput<AnswerResponse>, StepError> {
        let request = GenerationRequest::new(self.encoder.encode(state, EncodeMode::FinalAnswer)?);

        hooks.emit_final_answer_begin();
        let mut forward = |chunk: &str| hooks.emit_final_answer_chunk(chunk);

        match self.format {
            AnswerFormat::Structured => {
                let sink = hooks
                    .streams_final_answer()
                    .then_some(&mut forward as &mut ChunkSink<'_>);
                let extracted = self.llm.extract::<AnswerResponse>(request, sink).await?;
                Ok(StepOutput {
                    response: extracted.value,
                    raw: extracted.raw,
                })
            }
            AnswerFormat::PlainText => {
                let response = if hooks.streams_final_answer() {
                    self.llm.generate_streaming(request, &mut forward).await?
                } else {
                    self.llm.generate(request).await?
                };
                Ok(StepOutput {
                    response: AnswerResponse {
                        response: response.content.clone(),
                    },
                    raw: response.content,
                })
            }
        }
    }
}

//! Checks run against live provider endpoints.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::future::Future;
use std::sync::Once;

use cairn_models::llm::{GenerationError, GenerationRequest, Llm, Message};
use schemars::JsonSchema;
use serde::Deserialize;

static ENV: Once = Once::new();

/// Loads `.env` into the process environment the first time it is called.
pub fn init_env() {
    ENV.call_once(|| {
        dotenvy::dotenv().ok();
    });
}

/// One tool call proposed by the model.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlannedCall {
    pub name: String,
    pub arg_data: String,
}

/// A reasoning turn in the shape agents ask for.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Plan {
    pub thought: String,
    pub actions: Vec<PlannedCall>,
}

/// Live checks a provider must pass before an agent can drive it.
pub trait LiveChecks {
    /// Plain completion containing an expected word.
    fn plain_reply(&self) -> impl Future<Output = ()> + Send;

    /// A replayed conversation where the answer depends on an earlier turn.
    fn remembers_replayed_turns(&self) -> impl Future<Output = ()> + Send;

    /// Structured output matching the agent's reasoning shape.
    fn structured_plan(&self) -> impl Future<Output = ()> + Send;

    /// Streamed chunks concatenate to the final text.
    fn streamed_chunks_match(&self) -> impl Future<Output = ()> + Send;

    /// A model id the backend rejects surfaces as an error.
    fn unknown_model_fails(&self) -> impl Future<Output = ()> + Send;
}

impl LiveChecks for Llm {
    async fn plain_reply(&self) {
        let reply = self
            .generate(GenerationRequest::new(vec![Message::user(
                "Reply with the single word 'pong'.",
            )]))
            .await
            .expect("generation should succeed");

        assert!(
            reply.text().to_lowercase().contains("pong"),
            "unexpected reply: {}",
            reply.text()
        );
    }

    async fn remembers_replayed_turns(&self) {
        let request = GenerationRequest::new(vec![
            Message::system("Answer in as few words as possible."),
            Message::user("My favourite colour is teal. Just acknowledge."),
            Message::assistant("Noted."),
            Message::user("What is my favourite colour?"),
        ]);

        let reply = self.generate(request).await.expect("generation should succeed");
        assert!(
            reply.text().to_lowercase().contains("teal"),
            "earlier turn was lost: {}",
            reply.text()
        );
    }

    async fn structured_plan(&self) {
        let request = GenerationRequest::new(vec![
            Message::system(
                "You can call the tool 'weather' whose argument is a city name. \
                 Plan exactly one call.",
            ),
            Message::user("Is it raining in Oslo?"),
        ]);

        let plan: Plan = self
            .generate_structured(request)
            .await
            .expect("structured generation should succeed");

        assert!(!plan.thought.is_empty());
        assert_eq!(plan.actions.len(), 1, "plan: {plan:?}");
        assert_eq!(plan.actions[0].name, "weather");
        assert!(plan.actions[0].arg_data.contains("Oslo"));
    }

    async fn streamed_chunks_match(&self) {
        let mut streamed = String::new();
        let reply = self
            .generate_streaming(
                GenerationRequest::new(vec![Message::user("List three prime numbers.")]),
                &mut |chunk: &str| streamed.push_str(chunk),
            )
            .await
            .expect("streaming should succeed");

        assert!(!streamed.is_empty(), "no chunks arrived");
        assert_eq!(streamed, reply.text());
    }

    async fn unknown_model_fails(&self) {
        let err = self
            .generate(GenerationRequest::new(vec![Message::user("hi")]))
            .await
            .expect_err("unknown model should be rejected");

        assert!(
            matches!(err, GenerationError::Api { .. } | GenerationError::InvalidResponse(_)),
            "unexpected error: {err:?}"
        );
    }
}

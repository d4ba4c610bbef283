//! Integration tests for the `OpenAI` provider.
//!
//! These tests are ignored by default because they require:
//! - `OPENAI_API_KEY` environment variable (or in `.env` file)
//! - Network access to the `OpenAI` API
//! - May incur API costs
//!
//! To run these tests:
//! ```sh
//! cargo test -p cairn_model_providers --test openai_integration -- --ignored
//! ```

mod common;

use cairn_model_providers::OpenAiProvider;
use cairn_models::ModelRegistry;
use cairn_models::llm::Llm;
use common::{LiveChecks, init_env};
use std::sync::Arc;

const MODEL: &str = "openai/gpt-4o-mini";

fn live(model_id: &str) -> Llm {
    init_env();

    let provider = OpenAiProvider::from_env("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set");
    let mut registry = ModelRegistry::new();
    registry.register("openai", Arc::new(provider));
    registry.llm(model_id).expect("model id should resolve")
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn plain_reply() {
    live(MODEL).plain_reply().await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn remembers_replayed_turns() {
    live(MODEL).remembers_replayed_turns().await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn structured_plan() {
    live(MODEL).structured_plan().await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn streamed_chunks_match() {
    live(MODEL).streamed_chunks_match().await;
}

#[tokio::test]
#[ignore = "requires OPENAI_API_KEY"]
async fn unknown_model_fails() {
    live("openai/no-such-model").unknown_model_fails().await;
}

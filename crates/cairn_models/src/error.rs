//! Errors resolving `provider/model` identifiers.

/// A model identifier could not be turned into an [`Llm`](crate::llm::Llm).
#[derive(Debug, thiserror::Error)]
pub enum ModelLookupError {
    /// The identifier has no `/` between provider and model.
    #[error("malformed model id '{0}', expected 'provider/model'")]
    MalformedId(String),

    /// No provider is registered under the identifier's prefix.
    #[error("no provider registered as '{0}'")]
    UnknownProvider(String),
}

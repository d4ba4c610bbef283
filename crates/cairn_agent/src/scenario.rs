//! Behavioral scenarios shown in the system prompt.

use serde::{Deserialize, Serialize};

/// A named situation the agent should recognize, with guidance for handling it.
///
/// Scenarios are keyed by a short string. The system prompt lists every
/// scenario's key and headline; the takeaways are fetched on demand through
/// the `investigate_scenarios` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// One-line summary of the situation.
    pub headline: String,
    /// Guidance to follow when the situation applies.
    #[serde(default)]
    pub takeaways: Vec<String>,
}

impl Scenario {
    /// Creates a scenario.
    #[must_use]
    pub fn new(
        headline: impl Into<String>,
        takeaways: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            headline: headline.into(),
            takeaways: takeaways.into_iter().map(Into::into).collect(),
        }
    }
}

use crate::scenario::Scenario;
use cairn_tools::{FunctionTool, Tool, ToolArgs, ToolError};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the scenario retriever tool.
pub const INVESTIGATE_SCENARIOS: &str = "investigate_scenarios";

/// Builds the tool that returns the takeaways of the requested scenarios.
///
/// Takes `keys`, a list of scenario keys or a single key. Unknown keys are
/// reported in the output rather than failing the call.
pub fn scenario_tool(scenarios: BTreeMap<String, Scenario>) -> impl Tool {
    let scenarios = Arc::new(scenarios);
    FunctionTool::new(
        INVESTIGATE_SCENARIOS,
        [
            "Get the full details about the provided scenarios.",
            "Should be called when the agent notices that the conversation matches one of the provided scenarios, so the agent can align itself to the desired behaviour.",
            "Need to pass one argument, 'keys', which is a list of string keys matching the scenarios keys specified by the system.",
        ],
        move |args: ToolArgs| {
            let scenarios = Arc::clone(&scenarios);
            async move {
                let keys = args.string_list("keys")?;
                Ok::<_, ToolError>(describe(&scenarios, &keys))
            }
        },
    )
}

fn describe(scenarios: &BTreeMap<String, Scenario>, keys: &[String]) -> String {
    keys.iter()
        .map(|key| match scenarios.get(key) {
            None => format!("No scenario found with key '{key}'"),
            Some(scenario) => {
                let takeaways: Vec<String> =
                    scenario.takeaways.iter().map(|t| format!(" - {t}")).collect();
                format!("Scenario '{key}': {}\n{}", scenario.headline, takeaways.join("\n"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenarios() -> BTreeMap<String, Scenario> {
        BTreeMap::from([(
            "refund".to_string(),
            Scenario::new("Customer wants a refund", ["Be polite", "Check the order id"]),
        )])
    }

    #[tokio::test]
    async fn known_and_unknown_keys() {
        let tool = scenario_tool(scenarios());
        let args: ToolArgs = [("keys", json!(["refund", "nope"]))].into_iter().collect();

        let out = tool.call(args).await.unwrap();

        assert_eq!(
            out,
            "Scenario 'refund': Customer wants a refund\n - Be polite\n - Check the order id\n\nNo scenario found with key 'nope'"
        );
    }

    #[tokio::test]
    async fn single_string_key() {
        let tool = scenario_tool(scenarios());
        let args: ToolArgs = [("keys", json!("refund"))].into_iter().collect();

        assert!(tool.call(args).await.unwrap().starts_with("Scenario 'refund'"));
    }

    #[tokio::test]
    async fn keys_are_required() {
        let tool = scenario_tool(scenarios());
        let err = tool.call(ToolArgs::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "must specify 'keys'");

        let args: ToolArgs = [("keys", json!([1]))].into_iter().collect();
        let err = tool.call(args).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "must specify 'keys' to be a list of strings or a single string"
        );
    }
}

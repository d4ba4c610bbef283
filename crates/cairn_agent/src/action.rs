//! Actions requested by the model and the observations they produce.

use cairn_tools::ToolArgs;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Action {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool, in order.
    #[serde(default)]
    pub args: Vec<ActionArg>,
}

/// One named argument of an [`Action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionArg {
    /// Argument name.
    pub arg_name: String,
    /// Argument value; any JSON value.
    pub arg_data: Value,
}

impl Action {
    /// Creates an action with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, data: impl Into<Value>) -> Self {
        self.args.push(ActionArg {
            arg_name: name.into(),
            arg_data: data.into(),
        });
        self
    }

    /// Converts the ordered argument list into a name-keyed map.
    ///
    /// When a name repeats, the last value wins.
    #[must_use]
    pub fn tool_args(&self) -> ToolArgs {
        self.args
            .iter()
            .map(|arg| (arg.arg_name.clone(), arg.arg_data.clone()))
            .collect()
    }
}

/// The textual result of executing one [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Tool output, or an `error: ...` description.
    pub observed: String,
}

/// An action paired with what was observed when it ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionObservation {
    /// The requested action.
    pub action: Action,
    /// Its result.
    pub observation: Observation,
}

/// Renders arguments as `name=value&name=value` for display.
///
/// String values are shown without quotes; other values as compact JSON.
#[must_use]
pub fn format_action_args(args: &[ActionArg]) -> String {
    args.iter()
        .map(|arg| match &arg.arg_data {
            Value::String(text) => format!("{}={}", arg.arg_name, text),
            other => format!("{}={}", arg.arg_name, other),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_args_joins_pairs() {
        let action = Action::new("search")
            .arg("query", "rust")
            .arg("limit", 3)
            .arg("tags", json!(["a", "b"]));

        assert_eq!(
            format_action_args(&action.args),
            r#"query=rust&limit=3&tags=["a","b"]"#
        );
        assert_eq!(format_action_args(&[]), "");
    }

    #[test]
    fn tool_args_last_duplicate_wins() {
        let action = Action::new("t").arg("x", 1).arg("y", 2).arg("x", 3);
        let args = action.tool_args();

        assert_eq!(args.len(), 2);
        assert_eq!(args.value("x"), Some(&json!(3)));
    }

    #[test]
    fn missing_args_decode_as_empty() {
        let action: Action = serde_json::from_str(r#"{"name":"get_time"}"#).unwrap();
        assert!(action.args.is_empty());
    }
}

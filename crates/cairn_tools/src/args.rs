//! Loosely typed tool arguments.
//!
//! Argument values originate from the model's structured output, so their
//! shape is never guaranteed. [`ToolArgs`] keeps them as JSON values and
//! offers fallible accessors that fail with a message the model can act on.

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named arguments passed to a [`Tool`](crate::Tool), in the order the model gave them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    /// Creates an empty argument map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the raw value of an argument.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns whether an argument with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the arguments into a JSON object value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Returns a required string argument.
    ///
    /// # Errors
    ///
    /// Fails with `missing required argument: <name>` when absent and
    /// `<name> must be a string` when present with another type.
    pub fn required_str(&self, name: &str) -> Result<&str, ToolError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ToolError::parameter_error(format!("missing required argument: {name}")))?;
        value
            .as_str()
            .ok_or_else(|| ToolError::parameter_error(format!("{name} must be a string")))
    }

    /// Returns an optional string argument; a missing or `null` value is `None`.
    ///
    /// # Errors
    ///
    /// Fails when the argument is present with a non-string type.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, ToolError> {
        match self.0.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(ToolError::parameter_error(format!(
                "must specify '{name}' as a string (or not specify)"
            ))),
        }
    }

    /// Returns a list of strings, accepting a single string as a one-element list.
    ///
    /// # Errors
    ///
    /// Fails when the argument is absent, or is neither a string nor a list
    /// made only of strings.
    pub fn string_list(&self, name: &str) -> Result<Vec<String>, ToolError> {
        let shape_error = || {
            ToolError::parameter_error(format!(
                "must specify '{name}' to be a list of strings or a single string"
            ))
        };

        match self.0.get(name) {
            None => Err(ToolError::parameter_error(format!("must specify '{name}'"))),
            Some(Value::String(value)) => Ok(vec![value.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(shape_error))
                .collect(),
            Some(_) => Err(shape_error()),
        }
    }

    /// Deserializes a required argument by name.
    ///
    /// # Errors
    ///
    /// Fails when the argument is missing or does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, ToolError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ToolError::parameter_error(format!("missing required argument: {name}")))?;

        serde_json::from_value(value.clone()).map_err(|err| {
            ToolError::parameter_error(format!("failed to deserialize argument '{name}': {err}"))
        })
    }

    /// Deserializes an optional argument by name. Returns `None` if missing or null.
    ///
    /// # Errors
    ///
    /// Fails when the argument is present but does not deserialize as `T`.
    pub fn get_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ToolError> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|err| {
                    ToolError::parameter_error(format!(
                        "failed to deserialize argument '{name}': {err}"
                    ))
                }),
        }
    }

    /// Encodes the whole argument map as a JSON object string.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be serialized.
    pub fn to_json(&self) -> Result<String, ToolError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Map<String, Value>> for ToolArgs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ToolArgs {
    /// Later pairs overwrite earlier pairs with the same name.
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        match value {
            Value::Object(map) => ToolArgs::from(map),
            _ => panic!("test args must be an object"),
        }
    }

    #[test]
    fn required_str_reports_missing_and_mistyped() {
        let args = args(json!({"path": 3}));

        assert_eq!(
            args.required_str("query").unwrap_err().to_string(),
            "missing required argument: query"
        );
        assert_eq!(
            args.required_str("path").unwrap_err().to_string(),
            "path must be a string"
        );
    }

    #[test]
    fn optional_str_treats_null_as_absent() {
        let args = args(json!({"workdir": null, "other": "x"}));
        assert_eq!(args.optional_str("workdir").unwrap(), None);
        assert_eq!(args.optional_str("missing").unwrap(), None);
        assert_eq!(args.optional_str("other").unwrap(), Some("x"));
    }

    #[test]
    fn string_list_accepts_single_string() {
        let args = args(json!({"one": "a", "many": ["a", "b"], "bad": ["a", 1]}));

        assert_eq!(args.string_list("one").unwrap(), vec!["a"]);
        assert_eq!(args.string_list("many").unwrap(), vec!["a", "b"]);
        assert!(args.string_list("bad").is_err());
        assert_eq!(
            args.string_list("none").unwrap_err().to_string(),
            "must specify 'none'"
        );
    }

    #[test]
    fn later_duplicates_overwrite_in_place() {
        let args: ToolArgs = [
            ("a", json!(1)),
            ("b", json!(2)),
            ("a", json!(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(args.len(), 2);
        assert_eq!(args.get::<u32>("a").unwrap(), 3);
        assert_eq!(args.to_json().unwrap(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn typed_get_reports_bad_shape() {
        let args = args(json!({"n": "seven"}));
        let err = args.get::<u32>("n").unwrap_err();
        assert!(err.to_string().starts_with("failed to deserialize argument 'n'"));
        assert_eq!(args.get_optional::<u32>("m").unwrap(), None);
    }
}

//! JSON argument parsing helpers for tools that inspect their input.
//!
//! ```rust
//! use ptooling::{parse_json_object, required_string};
//!
//! let args = parse_json_object(r#"{"city":"Oslo"}"#).expect("object should parse");
//! assert_eq!(required_string(&args, "city").expect("city"), "Oslo");
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

/// Parses tool arguments; blank input is treated as an empty object.
pub fn parse_json_value(args_json: &str) -> Result<Value, ToolError> {
    if args_json.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

pub fn parse_json_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    match parse_json_value(args_json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::invalid_arguments("expected JSON object arguments")),
    }
}

pub fn required_string(args: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

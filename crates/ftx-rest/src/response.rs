//! Response envelope unwrapping
//!
//! Success is `{"result": ...}`, failure is `{"error": "<message>"}`,
//! independent of the HTTP status. Anything else is returned as-is so
//! endpoints with a different envelope still work.

use serde_json::Value;

use crate::error::{RestError, RestResult};

/// Parse a raw response body and unwrap its envelope
pub fn parse_response(body: &str) -> RestResult<Value> {
    let value: Value = serde_json::from_str(body).map_err(RestError::Decode)?;
    unwrap_envelope(value)
}

/// Unwrap a parsed response envelope
pub fn unwrap_envelope(value: Value) -> RestResult<Value> {
    let Value::Object(mut object) = value else {
        return Ok(value);
    };

    if let Some(result) = object.remove("result") {
        return Ok(result);
    }

    match object.remove("error") {
        Some(Value::String(message)) => Err(RestError::remote(message)),
        Some(other) => Err(RestError::remote(other.to_string())),
        None => Ok(Value::Object(object)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_is_unwrapped() {
        let value = parse_response(r#"{"success": true, "result": [1, 2, 3]}"#).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_null_result() {
        let value = parse_response(r#"{"success": true, "result": null}"#).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_error_is_rejected() {
        let err = parse_response(r#"{"success": false, "error": "Invalid parameter"}"#).unwrap_err();
        assert!(err.is_remote());
        assert_eq!(err.remote_message(), Some("Invalid parameter"));
    }

    #[test]
    fn test_non_string_error() {
        let err = unwrap_envelope(json!({"error": {"code": 7}})).unwrap_err();
        assert_eq!(err.remote_message(), Some(r#"{"code":7}"#));
    }

    #[test]
    fn test_result_wins_over_error() {
        let value = unwrap_envelope(json!({"result": 1, "error": "ignored"})).unwrap();
        assert_eq!(value, json!(1));
    }

    #[test]
    fn test_bare_object_passes_through() {
        let value = parse_response(r#"{"success": true}"#).unwrap();
        assert_eq!(value, json!({"success": true}));
    }

    #[test]
    fn test_non_object_passes_through() {
        assert_eq!(parse_response("[1]").unwrap(), json!([1]));
    }

    #[test]
    fn test_non_json_is_transport_failure() {
        let err = parse_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.is_transport());
    }
}

//! Request and response bodies that exist only on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::session::Identity;

/// Body of the login and register endpoints.
#[derive(Debug, Serialize)]
pub(super) struct AuthRequestBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful authentication response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct AuthResponseBody {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub user: Option<Identity>,
}

/// Reads the `detail` of an error body.
///
/// Plain rejections carry a string; request validation failures carry a list
/// of `{msg}` objects, which are joined.
pub(super) fn extract_detail(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// JSON kind name, for logging unexpected payloads.
pub(super) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_from_string() {
        assert_eq!(
            extract_detail(r#"{"detail": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn detail_from_validation_list() {
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn detail_absent_or_unreadable() {
        assert_eq!(extract_detail("<html>502</html>"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": ""}"#), None);
    }

    #[test]
    fn auth_response_tolerates_missing_token_type() {
        let body: AuthResponseBody =
            serde_json::from_str(r#"{"access_token": "t", "user": {"email": "a@b.io", "id": 1}}"#)
                .unwrap();
        assert_eq!(body.access_token.as_deref(), Some("t"));
        assert!(body.token_type.is_none());
        assert_eq!(body.user.unwrap().email.as_deref(), Some("a@b.io"));
    }
}

//! Serde helpers for backend payloads that send `null` for empty values.

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` as the field's default.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        #[serde(deserialize_with = "null_as_default")]
        text: String,
        #[serde(deserialize_with = "null_as_default")]
        items: Vec<String>,
    }

    #[test]
    fn null_reads_as_default() {
        let payload: Payload = serde_json::from_value(json!({"text": null, "items": null})).unwrap();
        assert_eq!(payload.text, "");
        assert!(payload.items.is_empty());
    }

    #[test]
    fn present_values_pass_through() {
        let payload: Payload =
            serde_json::from_value(json!({"text": "a", "items": ["b"]})).unwrap();
        assert_eq!(payload.text, "a");
        assert_eq!(payload.items, vec!["b".to_string()]);
    }

    #[test]
    fn wrong_type_still_fails() {
        assert!(serde_json::from_value::<Payload>(json!({"text": 5})).is_err());
    }
}

//! List-envelope and entity decoding.
//!
//! The backend answers list endpoints either with a bare JSON array or with a
//! paginated `{"content": [...]}` envelope. Both reduce to the same ordered
//! items here.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Extract list items from either envelope shape. Anything else is empty.
pub fn list_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("content") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decode every list item as `T`.
///
/// An item that does not decode fails the whole call: a list that matched
/// one of the envelope shapes is never silently shortened.
pub fn decode_list<T: DeserializeOwned>(operation: &str, body: Value) -> ApiResult<Vec<T>> {
    list_items(body)
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                ApiError::malformed(format!("{}: item {}: {}", operation, index, e))
            })
        })
        .collect()
}

/// Decode a single-entity response.
pub fn decode_entity<T: DeserializeOwned>(operation: &str, body: Value) -> ApiResult<T> {
    if body.is_null() {
        return Err(ApiError::malformed(format!("{}: empty response body", operation)));
    }
    serde_json::from_value(body).map_err(|e| ApiError::malformed(format!("{}: {}", operation, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skillbridge_models::Vaga;

    #[test]
    fn test_bare_array_and_envelope_agree() {
        let items = vec![json!({"id": 1}), json!({"id": 2})];
        assert_eq!(list_items(Value::Array(items.clone())), items);
        assert_eq!(list_items(json!({"content": items.clone(), "totalPages": 1})), items);
    }

    #[test]
    fn test_other_shapes_are_empty() {
        assert!(list_items(Value::Null).is_empty());
        assert!(list_items(json!("oops")).is_empty());
        assert!(list_items(json!({"data": [1, 2]})).is_empty());
        assert!(list_items(json!({"content": {"id": 1}})).is_empty());
        assert!(list_items(json!(42)).is_empty());
    }

    #[test]
    fn test_decode_list_rejects_bad_item() {
        let body = json!({"content": [
            {"id": 1, "titulo": "Backend", "empresa": "ACME"},
            "not a job"
        ]});
        let err = decode_list::<Vaga>("list_vagas", body).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(ref m) if m.contains("item 1")));
    }

    #[test]
    fn test_decode_entity_rejects_null_and_mismatch() {
        assert!(matches!(
            decode_entity::<Vaga>("get_vaga", Value::Null),
            Err(ApiError::MalformedResponse(_))
        ));
        assert!(matches!(
            decode_entity::<Vaga>("get_vaga", json!([1, 2])),
            Err(ApiError::MalformedResponse(_))
        ));
    }
}

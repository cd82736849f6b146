//! Shared helpers for identifiers and field reconciliation.
//!
//! The backend has renamed several fields over time and is not consistent
//! about whether ids are JSON strings or numbers. Everything in this module
//! exists so that the entity types can absorb those differences once, at
//! decode time.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier for any SkillBridge entity.
///
/// Accepts both `"42"` and `42` on the wire; always held as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntityId(s),
            RawId::Signed(n) => EntityId(n.to_string()),
            RawId::Unsigned(n) => EntityId(n.to_string()),
        })
    }
}

/// Pick the current field, falling back to the legacy one only when the
/// current one is absent.
pub fn prefer<T>(current: Option<T>, legacy: Option<T>) -> Option<T> {
    current.or(legacy)
}

/// Treat blank strings as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Whole(u64),
    Fractional(f64),
    Text(String),
}

/// Lenient decoder for hour counts: `40`, `40.0` and `"40"` all become `40`.
/// Negative or unparseable values decode as absent.
pub(crate) fn de_opt_hours<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| match n {
        RawNumber::Whole(v) => u32::try_from(v).ok(),
        RawNumber::Fractional(v) if v >= 0.0 && v <= u32::MAX as f64 => Some(v.round() as u32),
        RawNumber::Fractional(_) => None,
        RawNumber::Text(s) => s.trim().parse().ok(),
    }))
}

/// Hour counts that default to zero. Accepts the same inputs as
/// [`de_opt_hours`], including `null`.
pub(crate) fn de_hours<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_opt_hours(deserializer)?.unwrap_or(0))
}

/// Decode an explicit `null` the same way as a missing key.
pub(crate) fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_accepts_string_and_number() {
        let from_text: EntityId = serde_json::from_str("\"u1\"").unwrap();
        let from_number: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(from_text.as_str(), "u1");
        assert_eq!(from_number, EntityId::from("42"));
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityId::from("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_prefer_current_over_legacy() {
        assert_eq!(prefer(Some(1), Some(2)), Some(1));
        assert_eq!(prefer(None, Some(2)), Some(2));
        assert_eq!(prefer::<u32>(None, None), None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("x".into())), Some("x".into()));
        assert_eq!(non_blank(None), None);
    }

    #[derive(Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "de_null_default")]
        nome: String,
        #[serde(default, deserialize_with = "de_hours")]
        horas: u32,
    }

    #[test]
    fn test_null_reads_as_default() {
        let v: Lenient = serde_json::from_str(r#"{"nome": null, "horas": null}"#).unwrap();
        assert_eq!(v.nome, "");
        assert_eq!(v.horas, 0);

        let v: Lenient = serde_json::from_str(r#"{"nome": "Ana", "horas": 12.6}"#).unwrap();
        assert_eq!(v.nome, "Ana");
        assert_eq!(v.horas, 13);

        let v: Lenient = serde_json::from_str("{}").unwrap();
        assert_eq!(v.horas, 0);
    }
}

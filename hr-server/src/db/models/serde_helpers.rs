//! Serde helpers for SurrealDB records
//!
//! Record ids are stored as `table:key` but only the key crosses the API.
//! Accepts both formats on input:
//! - a string, either `table:key` or a bare key (API JSON)
//! - SurrealDB's native record id (database rows)

use serde::{Deserialize, Deserializer, Serializer};
use surrealdb::RecordId;

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

pub fn default_true() -> bool {
    true
}

/// Strip SurrealDB's identifier escaping (`⟨key⟩` or `` `key` ``)
pub fn unescape_key(raw: &str) -> String {
    let trimmed = raw
        .strip_prefix('⟨')
        .and_then(|s| s.strip_suffix('⟩'))
        .or_else(|| raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(raw);
    trimmed.to_string()
}

/// Key part of a record id
pub fn key_of(id: &RecordId) -> String {
    unescape_key(&id.key().to_string())
}

/// Record key as a plain string
struct FlexibleKey(String);

impl<'de> Deserialize<'de> for FlexibleKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = FlexibleKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a record key, 'table:key' string or RecordId")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value.parse::<RecordId>() {
                    Ok(id) => Ok(FlexibleKey(key_of(&id))),
                    Err(_) => Ok(FlexibleKey(unescape_key(value))),
                }
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(|id| FlexibleKey(key_of(&id)))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// `id` field: serialize the bare key, deserialize any record id form
pub mod record_key {
    use super::*;

    pub fn serialize<S>(key: &str, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(key)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleKey::deserialize(d).map(|k| k.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "record_key")]
        id: String,
    }

    #[test]
    fn test_unescape_key() {
        assert_eq!(unescape_key("⟨65f0abc⟩"), "65f0abc");
        assert_eq!(unescape_key("`65f0abc`"), "65f0abc");
        assert_eq!(unescape_key("65f0abc"), "65f0abc");
    }

    #[test]
    fn test_record_key_from_strings() {
        let row: Row = serde_json::from_str(r#"{"id":"employee:abc123"}"#).unwrap();
        assert_eq!(row.id, "abc123");

        let row: Row = serde_json::from_str(r#"{"id":"abc123"}"#).unwrap();
        assert_eq!(row.id, "abc123");
    }

    #[test]
    fn test_record_key_serializes_bare() {
        let json = serde_json::to_string(&Row { id: "abc".into() }).unwrap();
        assert_eq!(json, r#"{"id":"abc"}"#);
    }
}

//! The backend is not consistent about id types: the same trash can may come back as `1` from
//! one endpoint and `"1"` from another. Ids are always kept as strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Unsigned(v) => v.to_string(),
            RawId::Signed(v) => v.to_string(),
            RawId::Float(v) => v.to_string(),
        }
    }
}

pub fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(Into::into)
}

pub fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<RawId>::deserialize(deserializer).map(|id| id.map(Into::into))
}

/// Compares an id as it appeared in a raw JSON frame with a subscription id
#[must_use]
pub fn raw_id_matches(raw: &serde_json::Value, id: &str) -> bool {
    match raw {
        serde_json::Value::String(s) => s == id,
        serde_json::Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

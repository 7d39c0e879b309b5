use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Catalog key shared by systems and selectables.
///
/// Source files mix numeric ids (`30000142`) with string ids (`"-1"`), so both
/// forms normalise to the decimal string on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SystemId(String);

impl SystemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SystemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for SystemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for SystemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn numeric_and_string_ids_compare_equal() {
        let from_number: SystemId = serde_json::from_str("30000142").unwrap();
        let from_string: SystemId = serde_json::from_str("\"30000142\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "30000142");
    }

    #[test]
    fn negative_ids_keep_their_sign() {
        let id: SystemId = serde_json::from_str("-2").unwrap();
        assert_eq!(id, SystemId::from("-2"));
    }

    #[test]
    fn ids_deserialize_as_map_keys() {
        let map: BTreeMap<SystemId, u32> = serde_json::from_str(r#"{"1": 5, "-1": 7}"#).unwrap();
        assert_eq!(map.get(&SystemId::from(1_i64)), Some(&5));
        assert_eq!(map.get(&SystemId::from("-1")), Some(&7));
    }
}

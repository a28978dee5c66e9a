//! # Tagged-Union Wire Encoding
//!
//! Every union in the IR is written as an object carrying a `type`
//! discriminator and a sibling field named after the discriminator that holds
//! the variant payload:
//!
//! ```json
//! { "type": "geohash", "geohash": {} }
//! { "type": "deprecated", "deprecated": { "message": "use v2", "deadline": "2026-01-01" } }
//! ```
//!
//! serde's built-in enum representations cannot express a payload key that
//! varies with the tag, so IR unions deserialize through [`RawUnion`] and then
//! match the tag into a closed Rust enum. Each of those enums keeps an
//! `Unrecognized(tag)` variant: an unknown tag is not a parse failure, it is
//! reported by the resolver together with the IR element that carried it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A union whose tag has been read but whose payload is still untyped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawUnion {
    pub tag: String,
    /// The value stored under the key named by `tag`. Variants without a
    /// payload (`{"type": "active"}`) decode to an empty object.
    pub payload: Value,
}

impl RawUnion {
    pub fn new(tag: impl Into<String>, payload: Value) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    /// Returns true when the discriminator equals `tag`.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

impl<'de> Deserialize<'de> for RawUnion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::<String, Value>::deserialize(deserializer)?;
        let tag = match map.remove("type") {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(D::Error::custom(format!(
                    "union discriminator must be a string, found {other}"
                )))
            }
            None => return Err(D::Error::missing_field("type")),
        };
        let payload = map
            .remove(&tag)
            .unwrap_or_else(|| Value::Object(Map::new()));
        Ok(Self { tag, payload })
    }
}

//! JSON conversion for bags and values.
//!
//! [`Bag`] and [`Value`] implement `serde::Serialize` and `serde::Deserialize`, so they work
//! with any serde format. Serialization is strict: [`Value::Blob`] and non-finite floats have
//! no JSON representation and fail instead of being coerced to `null`.
//!
//! ```
//! # use parambag::Bag;
//! let params = Bag::from_json(r#"{"z": 1, "a": [true, null]}"#)?;
//! assert_eq!(params.to_json()?, r#"{"z":1,"a":[true,null]}"#);
//! # Ok::<(), parambag::Error>(())
//! ```

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{self, SerializeMap},
};

use super::{Bag, BagError, Entries, Value};
use crate::Result;

impl Bag {
    /// Serializes the whole structure to compact JSON text.
    ///
    /// Mappings become objects in insertion order, lists become arrays.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Unserializable`] if any value cannot be represented in JSON. No
    /// partial output is produced.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(unserializable)
    }

    /// Serializes the whole structure to indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(unserializable)
    }

    /// Parses JSON text into a new bag.
    ///
    /// Object key order is kept. Integers that fit in `i64` become [`Value::Int`]; every other
    /// number becomes [`Value::Float`].
    ///
    /// # Errors
    ///
    /// Returns [`BagError::Malformed`] if the text is not valid JSON or its top level is not an
    /// object.
    pub fn from_json(text: &str) -> Result<Bag> {
        let value: Value = serde_json::from_str(text).map_err(|e| BagError::Malformed {
            reason: e.to_string(),
        })?;

        match value {
            Value::Map(bag) => Ok(bag),
            other => Err(BagError::Malformed {
                reason: format!("top-level value must be an object, found {}", other.type_name()),
            }
            .into()),
        }
    }
}

fn unserializable(err: serde_json::Error) -> crate::Error {
    tracing::debug!(error = %err, "Parameters cannot be represented as JSON");
    BagError::Unserializable {
        reason: err.to_string(),
    }
    .into()
}

impl Serialize for Bag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.all();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(n) if n.is_finite() => serializer.serialize_f64(*n),
            Value::Float(n) => Err(ser::Error::custom(format!(
                "non-finite float {n} has no JSON representation"
            ))),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Blob(bytes) => Err(ser::Error::custom(format!(
                "opaque blob of {} bytes has no JSON representation",
                bytes.len()
            ))),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(bag) => bag.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Bag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Entries::deserialize(deserializer).map(Bag::create)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-compatible value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Value, E> {
        Ok(Value::Blob(v.to_vec()))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut entries = Entries::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.insert(key, value);
        }
        Ok(Value::Map(Bag::create(entries)))
    }
}

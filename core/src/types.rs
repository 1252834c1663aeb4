//! Shared primitive types used across the generator.

/// A calendar day. One simulation step = one day.
pub type Day = chrono::NaiveDate;

/// Sequential customer identifier, starting at 1.
pub type CustomerId = u32;

/// Bank account number, e.g. `00120000001`.
pub type AccountNumber = String;

/// Serde adapter writing booleans as `0`/`1` columns.
pub mod flag {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!("expected 0 or 1, got {other}"))),
        }
    }
}

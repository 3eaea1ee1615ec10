//! Lenient field decoding for snapshots coming back from storage.
//!
//! Stores hand back booleans as `0`/`1`, `"true"`/`"1"` or real booleans, and
//! counters occasionally as strings. These visitors fold every form into the
//! plain Rust type before the engine ever sees the value.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

use crate::ledger::Match;

/// Decode a boolean from a bool, a number (`1` is true) or a string
/// (`"1"`/`"true"`, case-insensitive, are true). Null decodes as `false`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct V;
    impl<'de> Visitor<'de> for V {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a boolean, 0/1, or a boolean-like string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v == 1)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v == 1)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v == 1.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            let s = v.trim().to_ascii_lowercase();
            Ok(s == "1" || s == "true")
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(V)
}

/// Decode a non-negative counter from an integer, a float (truncated) or a
/// numeric string. Negative values clamp to zero; unparseable strings and
/// null decode as zero.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct V;
    impl<'de> Visitor<'de> for V {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a non-negative number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            Ok(u32::try_from(v).unwrap_or(u32::MAX))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            Ok(u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.is_finite() && v > 0.0 {
                Ok(v.trunc().min(u32::MAX as f64) as u32)
            } else {
                Ok(0)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            let s = v.trim();
            if let Ok(n) = s.parse::<i64>() {
                return self.visit_i64(n);
            }
            match s.parse::<f64>() {
                Ok(f) => self.visit_f64(f),
                Err(_) => Ok(0),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }
    }

    deserializer.deserialize_any(V)
}

/// Decode a stored match from an already-parsed JSON value.
pub fn match_from_value(value: serde_json::Value) -> Result<Match, serde_json::Error> {
    serde_json::from_value(value)
}

/// Decode a stored match from JSON text.
pub fn match_from_str(s: &str) -> Result<Match, serde_json::Error> {
    serde_json::from_str(s)
}

//! Serde support for `f64` values that may be infinite or NaN.
//!
//! JSON has no literal for the IEEE special values, so `serde_json` writes
//! them as `null` and cannot read them back. Fields tagged with
//! `#[serde(with = "abacus_calculator::ieee")]` write finite values as
//! numbers and the special values as the strings `"inf"`, `"-inf"` and
//! `"NaN"`, the same text the display shows.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Reading {
//!     #[serde(with = "abacus_calculator::ieee")]
//!     value: f64,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;

/// Serializes an `f64`, keeping infinities and NaN.
///
/// This function can be used with `serde_derive`'s `with` and
/// `serialize_with` annotations.
pub fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    Ieee(*value).serialize(s)
}

/// Deserializes an `f64` written by [`serialize`]. Plain numbers are accepted
/// as well.
pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ieee::deserialize(d).map(|v| v.0)
}

/// The same encoding for `Option<f64>`; `None` stays `null`.
pub mod option {
    use super::Ieee;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        value.map(Ieee).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let got: Option<Ieee> = Deserialize::deserialize(d)?;
        Ok(got.map(|v| v.0))
    }
}

const INF: &str = "inf";
const NEG_INF: &str = "-inf";
const NAN: &str = "NaN";

#[derive(Debug, Clone, Copy)]
struct Ieee(f64);

impl Serialize for Ieee {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            s.serialize_str(NAN)
        } else if v.is_infinite() {
            s.serialize_str(if v > 0.0 { INF } else { NEG_INF })
        } else {
            s.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for Ieee {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(IeeeVisitor).map(Ieee)
    }
}

struct IeeeVisitor;

impl de::Visitor<'_> for IeeeVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a number or one of \"{INF}\", \"{NEG_INF}\", \"{NAN}\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            INF => Ok(f64::INFINITY),
            NEG_INF => Ok(f64::NEG_INFINITY),
            NAN => Ok(f64::NAN),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

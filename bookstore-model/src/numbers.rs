//! Lenient integer decoding for stored numeric fields.
//!
//! Documents written by shells and GUI tools store `1965` as a double.
//! Those values are accepted as integers as long as they carry no fractional
//! part and fit in an `i32`.

/// `value` as an `i32` when it is a whole number in range.
pub fn whole_i32(value: f64) -> Option<i32> {
    let in_range =
        value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// `deserialize_with` target accepting any integer or a whole-number float.
#[cfg(feature = "serde")]
pub fn deserialize_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(WholeI32Visitor)
}

#[cfg(feature = "serde")]
struct WholeI32Visitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for WholeI32Visitor {
    type Value = i32;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a whole number that fits in i32")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<i32, E> {
        i32::try_from(value).map_err(|_| {
            E::invalid_value(serde::de::Unexpected::Signed(value), &self)
        })
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<i32, E> {
        i32::try_from(value).map_err(|_| {
            E::invalid_value(serde::de::Unexpected::Unsigned(value), &self)
        })
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<i32, E> {
        whole_i32(value).ok_or_else(|| {
            E::invalid_value(serde::de::Unexpected::Float(value), &self)
        })
    }
}

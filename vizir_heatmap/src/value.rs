// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heterogeneous scalar values produced by accessors.

extern crate alloc;

use alloc::string::{String, ToString};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A scalar read from a record.
///
/// Accessors hand values back without coercion: numbers stay numbers, timestamps stay
/// timestamps and strings stay strings. Continuous channels (x, fill) accept
/// [`Value::Number`] and [`Value::Time`]; the categorical y channel accepts anything.
///
/// Equality and hashing follow "same value zero" semantics: `NaN` equals `NaN` and `-0.0`
/// equals `0.0`, so categorical keys deduplicate the way an intern set would.
#[derive(Clone, Debug)]
pub enum Value {
    /// A plain number.
    Number(f64),
    /// A UTC timestamp in milliseconds since the Unix epoch.
    Time(i64),
    /// A string key.
    Text(String),
}

impl Value {
    /// Returns the value on the numeric line, if it has one.
    ///
    /// Timestamps are returned as milliseconds.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Time(ms) => Some(*ms as f64),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` for timestamps.
    pub fn is_time(&self) -> bool {
        matches!(self, Self::Time(_))
    }

    /// Returns the timestamp as a UTC date-time, if this is an in-range [`Value::Time`].
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(ms) => DateTime::from_timestamp_millis(*ms),
            _ => None,
        }
    }

    /// Natural ordering for quantitative values (numeric or chronological).
    ///
    /// Returns `None` when either side is text or `NaN`.
    pub fn partial_cmp_quantitative(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Time(a), Self::Time(b)) => Some(a.cmp(b)),
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }

    fn canonical_bits(v: f64) -> u64 {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else if v == 0.0 {
            0.0_f64.to_bits()
        } else {
            v.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                Self::canonical_bits(*a) == Self::canonical_bits(*b)
            }
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Number(v) => Self::canonical_bits(*v).hash(state),
            Self::Time(ms) => ms.hash(state),
            Self::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Time(ms) => match DateTime::from_timestamp_millis(*ms) {
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
                None => write!(f, "{ms}ms"),
            },
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Plain integers are numbers; build [`Value::Time`] explicitly for epoch milliseconds.
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss, reason = "magnitudes past 2^53 round")]
        let v = value as f64;
        Self::Number(v)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        #[allow(clippy::cast_precision_loss, reason = "magnitudes past 2^53 round")]
        let v = value as f64;
        Self::Number(v)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value.timestamp_millis())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::Time(value.and_utc().timestamp_millis())
    }
}

/// Dates are placed at UTC midnight.
impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::from(value.and_time(NaiveTime::MIN))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use hashbrown::HashSet;

    use super::*;

    #[test]
    fn integers_convert_to_numbers() {
        assert_eq!(Value::from(7_i32), Value::Number(7.0));
        assert_eq!(Value::from(86_400_000_i64), Value::Number(86_400_000.0));
        assert_eq!(Value::from(3_u64), Value::Number(3.0));
        assert_ne!(Value::from(5_i64), Value::Time(5));
    }

    #[test]
    fn same_value_zero_equality() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(-0.0), Value::Number(0.0));
        assert_ne!(Value::Number(1.0), Value::Time(1));
        assert_ne!(Value::from("1"), Value::Number(1.0));

        let set: HashSet<Value> = [Value::Number(-0.0), Value::Number(0.0), Value::Number(f64::NAN)]
            .into_iter()
            .chain([Value::Number(f64::NAN)])
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn dates_convert_to_utc_midnight_millis() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date");
        assert_eq!(Value::from(day), Value::Time(1_704_153_600_000));
        assert_eq!(Value::Time(1_704_153_600_000).as_f64(), Some(1_704_153_600_000.0));
    }

    #[test]
    fn quantitative_ordering_skips_text() {
        let a = Value::Number(1.0);
        let b = Value::Number(2.0);
        assert_eq!(a.partial_cmp_quantitative(&b), Some(Ordering::Less));
        assert_eq!(a.partial_cmp_quantitative(&Value::from("x")), None);
        assert_eq!(
            Value::Time(5).partial_cmp_quantitative(&Value::Time(3)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn display_formats_each_variant() {
        use alloc::format;
        assert_eq!(format!("{}", Value::from("O3")), "O3");
        assert_eq!(format!("{}", Value::Number(2.5)), "2.5");
        assert_eq!(
            format!("{}", Value::Time(1_704_067_200_000)),
            "2024-01-01T00:00:00.000Z"
        );
    }
}

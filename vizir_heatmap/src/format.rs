// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.
//!
//! Labels are either produced by a default formatter whose precision follows the tick
//! step, or by an explicit [`TickFormat`]:
//! - numeric axes accept a small d3-like subset, `[,][.precision][f|d|e|%]`,
//! - temporal axes accept a chrono strftime pattern such as `%Y-%m-%d`.
//!
//! Explicit formats are validated when they are parsed so that formatting itself cannot fail.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::{HeatmapError, Value};

// More digits than this only shows float noise.
const MAX_DECIMALS: usize = 17;

/// Formats `v` with as many decimals as the tick `step` needs.
///
/// Steps of 1 and above print integers; a step of `0.05` prints two decimals.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = step_decimals(step);
    fixed(v, decimals)
}

fn step_decimals(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    let d = (-(step.log10() + 1e-9).floor()).clamp(0.0, MAX_DECIMALS as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, MAX_DECIMALS]")]
    {
        d as usize
    }
}

/// Fixed-point formatting without a `-0` result.
fn fixed(v: f64, decimals: usize) -> String {
    let s = alloc::format!("{v:.decimals$}");
    if s.starts_with('-') && s[1..].bytes().all(|b| b == b'0' || b == b'.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// The conversion of a [`NumberFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    /// No type given: step-aware decimals, or fixed when a precision is given.
    Default,
    /// `f`: fixed point.
    Fixed,
    /// `d`: rounded to an integer.
    Integer,
    /// `e`: exponent notation.
    Exponent,
    /// `%`: multiplied by 100, fixed point, with a percent sign.
    Percent,
}

/// A parsed numeric format specifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    /// Group the integer part in thousands with `,`.
    pub grouping: bool,
    /// Digits after the decimal point.
    pub precision: Option<usize>,
    /// Conversion.
    pub kind: NumberKind,
}

impl NumberFormat {
    /// Parses `[,][.precision][f|d|e|%]`.
    pub fn parse(spec: &str) -> Result<Self, HeatmapError> {
        let invalid = || HeatmapError::InvalidFormat {
            spec: spec.to_string(),
        };
        let mut rest = spec;
        let grouping = match rest.strip_prefix(',') {
            Some(r) => {
                rest = r;
                true
            }
            None => false,
        };
        let precision = match rest.strip_prefix('.') {
            Some(r) => {
                let digits = r.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 {
                    return Err(invalid());
                }
                let p: usize = r[..digits].parse().map_err(|_| invalid())?;
                if p > MAX_DECIMALS + 3 {
                    return Err(invalid());
                }
                rest = &r[digits..];
                Some(p)
            }
            None => None,
        };
        let kind = match rest {
            "" => NumberKind::Default,
            "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "e" => NumberKind::Exponent,
            "%" => NumberKind::Percent,
            _ => return Err(invalid()),
        };
        Ok(Self {
            grouping,
            precision,
            kind,
        })
    }

    /// Formats a value. `step` is the tick step, used only by [`NumberKind::Default`].
    pub fn format(&self, v: f64, step: f64) -> String {
        if !v.is_finite() {
            return alloc::format!("{v}");
        }
        let body = match self.kind {
            NumberKind::Default => match self.precision {
                Some(p) => fixed(v, p),
                None => format_tick_with_step(v, step),
            },
            NumberKind::Fixed => fixed(v, self.precision.unwrap_or(6)),
            NumberKind::Integer => fixed(v.round(), 0),
            NumberKind::Exponent => exponent(v, self.precision.unwrap_or(6)),
            NumberKind::Percent => {
                let mut s = fixed(v * 100.0, self.precision.unwrap_or(0));
                if self.grouping {
                    s = group_thousands(&s);
                }
                s.push('%');
                return s;
            }
        };
        if self.grouping && self.kind != NumberKind::Exponent {
            group_thousands(&body)
        } else {
            body
        }
    }
}

fn exponent(v: f64, precision: usize) -> String {
    let s = alloc::format!("{v:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => alloc::format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

/// Inserts `,` between groups of three integer digits.
fn group_thousands(s: &str) -> String {
    let (sign, unsigned) = match s.strip_prefix('-') {
        Some(u) => ("-", u),
        None => ("", s),
    };
    let (int, frac) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };
    let mut out = String::with_capacity(s.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}

/// A validated strftime pattern for timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeFormat {
    spec: String,
    items: Vec<Item<'static>>,
}

impl TimeFormat {
    /// Parses a chrono strftime pattern.
    pub fn parse(spec: &str) -> Result<Self, HeatmapError> {
        let items = StrftimeItems::new(spec)
            .parse_to_owned()
            .map_err(|_| HeatmapError::InvalidFormat {
                spec: spec.to_string(),
            })?;
        Ok(Self {
            spec: spec.to_string(),
            items,
        })
    }

    /// Formats a UTC millisecond timestamp.
    pub fn format(&self, ms: f64) -> String {
        if !ms.is_finite() {
            return alloc::format!("{ms}");
        }
        let clamped = ms.round().clamp(i64::MIN as f64, i64::MAX as f64);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        let ms = clamped as i64;
        match DateTime::from_timestamp_millis(ms) {
            Some(dt) => dt.format_with_items(self.items.iter()).to_string(),
            None => alloc::format!("{ms}"),
        }
    }

    /// The pattern as written.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

/// An explicit tick label format.
#[derive(Clone, Debug, PartialEq)]
pub enum TickFormat {
    /// Numeric specifier.
    Number(NumberFormat),
    /// Timestamp pattern.
    Time(TimeFormat),
}

impl TickFormat {
    /// Parses `spec` as a strftime pattern when `temporal`, else as a numeric specifier.
    pub fn parse(spec: &str, temporal: bool) -> Result<Self, HeatmapError> {
        if temporal {
            TimeFormat::parse(spec).map(Self::Time)
        } else {
            NumberFormat::parse(spec).map(Self::Number)
        }
    }

    /// Formats a position on the number line (timestamps in ms).
    pub fn format(&self, v: f64, step: f64) -> String {
        match self {
            Self::Number(n) => n.format(v, step),
            Self::Time(t) => t.format(v),
        }
    }

    /// Formats a categorical key; keys the format does not apply to use their `Display`.
    pub fn format_value(&self, value: &Value) -> String {
        match (self, value) {
            (Self::Number(n), Value::Number(v)) => n.format(*v, 1.0),
            (Self::Time(t), Value::Time(ms)) => t.format(*ms as f64),
            _ => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn default_precision_follows_step() {
        assert_eq!(format_tick_with_step(20.0, 10.0), "20");
        assert_eq!(format_tick_with_step(0.3, 0.1), "0.3");
        assert_eq!(format_tick_with_step(0.15, 0.05), "0.15");
        assert_eq!(format_tick_with_step(-0.0001, 0.5), "0.0");
        assert_eq!(format_tick_with_step(-2.0, 1.0), "-2");
    }

    #[test]
    fn numeric_specifiers() {
        let f = |spec: &str, v: f64| NumberFormat::parse(spec).unwrap().format(v, 1.0);
        assert_eq!(f(".2f", 3.14159), "3.14");
        assert_eq!(f(",d", 1_234_567.4), "1,234,567");
        assert_eq!(f(",.1f", -12_345.67), "-12,345.7");
        assert_eq!(f(".0%", 0.25), "25%");
        assert_eq!(f(".1e", 1500.0), "1.5e+3");
        assert_eq!(f(".1e", 0.0015), "1.5e-3");
        assert_eq!(f("", 7.0), "7");
        assert_eq!(f(".3", 2.0), "2.000");
    }

    #[test]
    fn bad_numeric_specifiers_are_rejected() {
        for spec in ["x", ".f", ",,d", ".2fz", "%Y"] {
            assert_eq!(
                NumberFormat::parse(spec),
                Err(HeatmapError::InvalidFormat {
                    spec: spec.to_string()
                }),
                "{spec}"
            );
        }
    }

    #[test]
    fn time_patterns() {
        let f = TimeFormat::parse("%Y-%m-%d").unwrap();
        assert_eq!(f.format(1_704_153_600_000.0), "2024-01-02");
        assert_eq!(f.spec(), "%Y-%m-%d");
        assert!(matches!(
            TickFormat::parse("%Q", true),
            Err(HeatmapError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn categorical_keys_fall_back_to_display() {
        let f = TickFormat::parse(".1f", false).unwrap();
        assert_eq!(f.format_value(&Value::Number(2.0)), "2.0");
        assert_eq!(f.format_value(&Value::from("O3")), "O3");
    }
}

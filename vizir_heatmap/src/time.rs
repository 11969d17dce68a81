// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is modeled as UTC **milliseconds** since the Unix epoch. This module provides:
//! - "nice" tick steps from one second up to a year,
//! - default tick labels whose granularity follows the tick step (e.g. `Jan 02`, `14:30`).
//!
//! Steps of a month and longer use fixed 30- and 365-day lengths rather than calendar
//! months, so those ticks drift from month boundaries over long spans.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::DateTime;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::ticks_within;
use crate::value::MS_PER_DAY;

const SECOND: f64 = 1000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = MS_PER_DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Returns "nice" tick timestamps inside a millisecond domain.
pub fn nice_time_ticks_ms(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    let reverse = min > max;
    if reverse {
        core::mem::swap(&mut min, &mut max);
    }

    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_time_step_ms(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let mut ticks = ticks_within(min, max, step);
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn nice_time_step_ms(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    const STEPS: &[f64] = &[
        SECOND,
        5.0 * SECOND,
        15.0 * SECOND,
        30.0 * SECOND,
        MINUTE,
        5.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
        DAY,
        2.0 * DAY,
        7.0 * DAY,
        MONTH,
        3.0 * MONTH,
        YEAR,
    ];

    for &s in STEPS {
        if s >= step {
            return s;
        }
    }
    // Past a year, step in whole years.
    (step / YEAR).ceil().max(1.0) * YEAR
}

/// Formats a tick timestamp (ms) with a granularity chosen from the tick step (ms).
pub fn format_time_ms(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let ms = {
        let ms_f = v.round().clamp(i64::MIN as f64, i64::MAX as f64);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
        {
            ms_f as i64
        }
    };
    let Some(dt) = DateTime::from_timestamp_millis(ms) else {
        return alloc::format!("{ms}");
    };
    let step = step.abs();
    let pattern = if step >= YEAR {
        "%Y"
    } else if step >= MONTH {
        "%b %Y"
    } else if step >= DAY {
        "%b %d"
    } else if step >= MINUTE {
        "%H:%M"
    } else {
        "%H:%M:%S"
    };
    alloc::format!("{}", dt.format(pattern))
}

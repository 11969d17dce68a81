// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default domain derivation.
//!
//! Each channel gets its domain either from [`HeatmapOptions`](crate::HeatmapOptions) or from
//! the extracted [`Series`]. Explicit x and fill domains are taken verbatim; explicit y keys
//! only lose repeats, keeping the first occurrence. Derived domains are:
//! - x: the `(min, max)` extent in natural order,
//! - y: the distinct keys in first-seen order,
//! - fill: `(min, target, max)`.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashSet;

use crate::{Channel, HeatmapError, HeatmapOptions, Series, Value};

/// A continuous x domain.
#[derive(Clone, Debug, PartialEq)]
pub struct XDomain {
    /// Lower end (numeric or temporal).
    pub min: Value,
    /// Upper end (numeric or temporal).
    pub max: Value,
}

impl XDomain {
    /// Creates a domain from two quantitative values.
    pub fn new(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Returns the domain ends on the number line (timestamps in ms).
    pub fn bounds(&self) -> Result<(f64, f64), HeatmapError> {
        let lo = self.min.as_f64().ok_or_else(|| HeatmapError::NonQuantitative {
            channel: Channel::X,
            index: None,
            value: self.min.clone(),
        })?;
        let hi = self.max.as_f64().ok_or_else(|| HeatmapError::NonQuantitative {
            channel: Channel::X,
            index: None,
            value: self.max.clone(),
        })?;
        Ok((lo, hi))
    }

    /// Returns `true` if both ends are timestamps.
    pub fn is_temporal(&self) -> bool {
        self.min.is_time() && self.max.is_time()
    }
}

/// A three-stop fill domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillDomain {
    /// Value mapped to the first range stop.
    pub min: f64,
    /// Value mapped to the middle range stop, typically a target threshold.
    pub mid: Option<f64>,
    /// Value mapped to the last range stop.
    pub max: f64,
}

impl FillDomain {
    /// Creates a fill domain.
    pub fn new(min: f64, mid: Option<f64>, max: f64) -> Self {
        Self { min, mid, max }
    }

    /// The value mapped to the middle stop.
    ///
    /// Without an explicit `mid` this is the midpoint of `min` and `max`.
    pub fn center(&self) -> f64 {
        self.mid.unwrap_or(0.5 * (self.min + self.max))
    }
}

/// The resolved domains for all three channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Domains {
    /// x extent.
    pub x: XDomain,
    /// Ordered distinct y keys.
    pub y: Vec<Value>,
    /// Fill stops.
    pub fill: FillDomain,
}

impl Domains {
    /// Resolves every domain, preferring explicit options over derivation.
    ///
    /// x is resolved first, so an empty series fails with [`HeatmapError::EmptyDomain`] for
    /// the x channel before anything else is computed.
    pub fn resolve(series: &Series, options: &HeatmapOptions) -> Result<Self, HeatmapError> {
        let x = match &options.x_domain {
            Some(d) => d.clone(),
            None => derive_x_domain(&series.x)?,
        };
        let y = match &options.y_domain {
            Some(keys) => derive_y_domain(keys),
            None => derive_y_domain(&series.y),
        };
        let fill = match options.fill_domain {
            Some(d) => d,
            None => derive_fill_domain(&series.fill, options.target_limit)?,
        };
        log::debug!(
            "heatmap domains: x = [{}, {}], y = {} keys, fill = ({}, {:?}, {})",
            x.min,
            x.max,
            y.len(),
            fill.min,
            fill.mid,
            fill.max
        );
        Ok(Self { x, y, fill })
    }
}

/// Reads a quantitative value, rejecting text and non-finite numbers.
pub(crate) fn finite_f64(channel: Channel, index: usize, value: &Value) -> Result<f64, HeatmapError> {
    let v = value.as_f64().ok_or_else(|| HeatmapError::NonQuantitative {
        channel,
        index: Some(index),
        value: value.clone(),
    })?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HeatmapError::NonFinite { channel, index })
    }
}

/// Computes the `(min, max)` extent of `x` in natural order.
///
/// Timestamps stay timestamps, so the domain of a temporal series is itself temporal.
pub fn derive_x_domain(x: &[Value]) -> Result<XDomain, HeatmapError> {
    let mut extent: Option<(&Value, &Value)> = None;
    for (index, value) in x.iter().enumerate() {
        finite_f64(Channel::X, index, value)?;
        extent = Some(match extent {
            None => (value, value),
            Some((lo, hi)) => {
                let lo = if value.partial_cmp_quantitative(lo) == Some(Ordering::Less) {
                    value
                } else {
                    lo
                };
                let hi = if value.partial_cmp_quantitative(hi) == Some(Ordering::Greater) {
                    value
                } else {
                    hi
                };
                (lo, hi)
            }
        });
    }
    let (lo, hi) = extent.ok_or(HeatmapError::EmptyDomain { channel: Channel::X })?;
    Ok(XDomain::new(lo.clone(), hi.clone()))
}

/// Collects the distinct keys of `y` in first-seen order.
///
/// No sorting is applied; band order follows the data.
pub fn derive_y_domain(y: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::with_capacity(y.len());
    let mut out = Vec::new();
    for value in y {
        if seen.insert(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Computes `(min, target, max)` over the finite fill values.
///
/// Non-finite values are skipped; they are rendered with the missing-value color later.
pub fn derive_fill_domain(fill: &[Value], target: Option<f64>) -> Result<FillDomain, HeatmapError> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (index, value) in fill.iter().enumerate() {
        let v = value.as_f64().ok_or_else(|| HeatmapError::NonQuantitative {
            channel: Channel::Fill,
            index: Some(index),
            value: value.clone(),
        })?;
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Ok(FillDomain::new(min, target, max))
    } else {
        Err(HeatmapError::EmptyDomain {
            channel: Channel::Fill,
        })
    }
}

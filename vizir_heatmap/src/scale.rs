// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Three families of scales feed the heatmap:
//! - continuous scales ([`ScaleContinuous`]) for the x position,
//! - categorical scales ([`ScaleCategorical`]) for the y bands,
//! - a three-stop diverging scale ([`ScaleDiverging`]) that, composed with a
//!   [`Palette`], becomes the [`FillScale`].
//!
//! All scales are plain values: building one never touches another.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;
use peniko::Color;

use crate::{FillDomain, Palette, Value, time};

/// Which continuous scale to use for the x channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum XScaleKind {
    /// [`XScaleKind::Time`] when both domain ends are timestamps, else [`XScaleKind::Linear`].
    #[default]
    Auto,
    /// Linear mapping.
    Linear,
    /// Linear mapping over millisecond timestamps, with calendar-ish ticks.
    Time,
    /// Base-10 logarithmic mapping (positive domains only).
    Log,
}

/// Which categorical scale to use for the y channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YScaleKind {
    /// Equal-width bands; positions are band edges.
    #[default]
    Band,
    /// Points at the band centers; positions are the points themselves.
    Point,
}

/// How the fill domain is interpolated between its stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillScaleKind {
    /// Piecewise linear.
    #[default]
    Linear,
    /// Piecewise linear in log space (positive domains only).
    Log,
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(y),
            Self::Log(s) => s.invert(y),
            Self::Time(s) => s.invert(y),
        }
    }

    /// Returns tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice” tick values (multiples of 1, 2 or 5 × 10ᵏ) inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
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
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let mut ticks = ticks_within(min, max, step);
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Multiples of `step` inside `[min, max]`.
pub(crate) fn ticks_within(min: f64, max: f64, step: f64) -> Vec<f64> {
    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let n_f = stop - start;
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        return Vec::new();
    };
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

// Absorbs rounding in `ln(x) / ln(base)` so exact powers count as inside the domain.
const LOG_TICK_EPSILON: f64 = 1e-9;

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 <= 0.0 || d1 <= 0.0 || r1 == r0 {
            return d0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let t = (y - r0) / (r1 - r0);
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// Returns powers of the base that fall inside the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = {
            let e = (self.log_base(min) - LOG_TICK_EPSILON)
                .ceil()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let max_e = {
            let e = (self.log_base(max) + LOG_TICK_EPSILON)
                .floor()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A time scale: a linear scale over millisecond timestamps with time-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp (ms) into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back to a timestamp (ms).
    pub fn invert(&self, y: f64) -> f64 {
        self.inner.invert(y)
    }

    /// Returns tick timestamps inside the domain on second..year boundaries.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain();
        time::nice_time_ticks_ms(d0, d1, count)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

/// Equal-width bands over an index space.
///
/// When the range is reversed (`r0 > r1`), index 0 is placed at `r0`'s end, so a
/// `(bottom, top)` range in screen coordinates stacks the first band at the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self { range, count }
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        if self.count == 0 {
            return 0.0;
        }
        (r1 - r0).abs() / self.count as f64
    }

    /// Returns the computed band width (bands are flush, so this equals the step).
    pub fn band_width(&self) -> f64 {
        self.step()
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the lower-coordinate edge of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let slot = if r1 >= r0 {
            index
        } else {
            self.count.saturating_sub(index + 1)
        };
        r0.min(r1) + self.step() * slot as f64
    }

    /// Returns the index of the band containing `px`, if any.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        let (r0, r1) = self.range;
        let step = self.step();
        if step == 0.0 || !px.is_finite() {
            return None;
        }
        let offset = (px - r0.min(r1)) / step;
        if offset < 0.0 || offset >= self.count as f64 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "offset is in [0, count) so the floor fits in usize"
        )]
        let slot = offset.floor() as usize;
        Some(if r1 >= r0 {
            slot
        } else {
            self.count - 1 - slot
        })
    }
}

/// Discrete points at band centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScalePoint {
    /// Creates a new point scale with half a step of outer padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.5,
        }
    }

    /// Returns the distance between adjacent points.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        if self.count == 0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = (self.count as f64 - 1.0) + 2.0 * self.padding;
        if denom <= 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the position of the point at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.step();
        let slot = if r1 >= r0 {
            index
        } else {
            self.count.saturating_sub(index + 1)
        };
        r0.min(r1) + self.padding * step + step * slot as f64
    }

    /// Returns the index of the point nearest to `px`, if `px` is inside the range.
    pub fn index_at(&self, px: f64) -> Option<usize> {
        let (r0, r1) = self.range;
        let (lo, hi) = (r0.min(r1), r0.max(r1));
        if self.count == 0 || !(lo..=hi).contains(&px) {
            return None;
        }
        let step = self.step();
        if step == 0.0 {
            return Some(0);
        }
        let slot_f = ((px - lo) / step - self.padding)
            .round()
            .clamp(0.0, self.count as f64 - 1.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, count - 1]")]
        let slot = slot_f as usize;
        Some(if r1 >= r0 {
            slot
        } else {
            self.count - 1 - slot
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Slots {
    Band(ScaleBand),
    Point(ScalePoint),
}

/// A categorical scale: ordered keys laid out as bands or points.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleCategorical {
    keys: Vec<Value>,
    lookup: HashMap<Value, usize>,
    slots: Slots,
}

impl ScaleCategorical {
    /// Creates a scale of the given kind over `keys`.
    ///
    /// Repeated keys are dropped, so each key owns exactly one slot in first-seen order.
    pub fn new(kind: YScaleKind, keys: Vec<Value>, range: (f64, f64)) -> Self {
        let mut lookup = HashMap::with_capacity(keys.len());
        let mut distinct = Vec::with_capacity(keys.len());
        for key in keys {
            if !lookup.contains_key(&key) {
                lookup.insert(key.clone(), distinct.len());
                distinct.push(key);
            }
        }
        let keys = distinct;
        let slots = match kind {
            YScaleKind::Band => Slots::Band(ScaleBand::new(range, keys.len())),
            YScaleKind::Point => Slots::Point(ScalePoint::new(range, keys.len())),
        };
        Self {
            keys,
            lookup,
            slots,
        }
    }

    /// Convenience constructor for a band scale.
    pub fn band(keys: Vec<Value>, range: (f64, f64)) -> Self {
        Self::new(YScaleKind::Band, keys, range)
    }

    /// Returns the scale kind.
    pub fn kind(&self) -> YScaleKind {
        match self.slots {
            Slots::Band(_) => YScaleKind::Band,
            Slots::Point(_) => YScaleKind::Point,
        }
    }

    /// Returns the ordered keys.
    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self.slots {
            Slots::Band(s) => s.range,
            Slots::Point(s) => s.range,
        }
    }

    /// Returns the index of `key` in the domain.
    pub fn index_of(&self, key: &Value) -> Option<usize> {
        self.lookup.get(key).copied()
    }

    /// Returns the position for the key at `index`.
    pub fn position(&self, index: usize) -> f64 {
        match self.slots {
            Slots::Band(s) => s.position(index),
            Slots::Point(s) => s.position(index),
        }
    }

    /// Maps a key to its band edge (or point); `None` if the key is not in the domain.
    pub fn map(&self, key: &Value) -> Option<f64> {
        self.index_of(key).map(|i| self.position(i))
    }

    /// Returns the key at pixel `px`, if any.
    pub fn invert(&self, px: f64) -> Option<&Value> {
        let index = match self.slots {
            Slots::Band(s) => s.index_at(px),
            Slots::Point(s) => s.index_at(px),
        }?;
        self.keys.get(index)
    }

    /// Returns the distance between adjacent slots.
    pub fn step(&self) -> f64 {
        match self.slots {
            Slots::Band(s) => s.step(),
            Slots::Point(s) => s.step(),
        }
    }

    /// Returns the band width (zero for point scales).
    pub fn band_width(&self) -> f64 {
        match self.slots {
            Slots::Band(s) => s.band_width(),
            Slots::Point(_) => 0.0,
        }
    }
}

/// A clamped, piecewise mapping from three domain stops to three range stops.
///
/// Values below the first stop map to the first range stop and values above the last
/// stop map to the last range stop; out-of-domain values are never an error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleDiverging {
    domain: [f64; 3],
    range: [f64; 3],
    kind: FillScaleKind,
}

impl ScaleDiverging {
    /// Creates a diverging scale.
    ///
    /// A descending domain is accepted and flipped along with the range. The middle stop is
    /// clamped into `[min, max]`.
    pub fn new(domain: [f64; 3], range: [f64; 3]) -> Self {
        let (mut domain, mut range) = (domain, range);
        if domain[0] > domain[2] {
            domain.reverse();
            range.reverse();
        }
        domain[1] = domain[1].clamp(domain[0], domain[2]);
        Self {
            domain,
            range,
            kind: FillScaleKind::Linear,
        }
    }

    /// Creates a diverging scale from a [`FillDomain`], centering on [`FillDomain::center`].
    pub fn from_fill_domain(domain: &FillDomain, range: [f64; 3]) -> Self {
        Self::new([domain.min, domain.center(), domain.max], range)
    }

    /// Sets the interpolation kind.
    pub fn with_kind(mut self, kind: FillScaleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the (ascending) domain stops.
    pub fn domain(&self) -> [f64; 3] {
        self.domain
    }

    /// Returns the range stops, aligned with [`ScaleDiverging::domain`].
    pub fn range(&self) -> [f64; 3] {
        self.range
    }

    fn transform(&self, v: f64) -> f64 {
        match self.kind {
            FillScaleKind::Linear => v,
            FillScaleKind::Log => v.ln(),
        }
    }

    fn untransform(&self, v: f64) -> f64 {
        match self.kind {
            FillScaleKind::Linear => v,
            FillScaleKind::Log => core::f64::consts::E.powf(v),
        }
    }

    /// Maps a value to the range, clamping to the outer stops.
    pub fn map(&self, v: f64) -> f64 {
        let [d0, d1, d2] = self.domain;
        let v = v.clamp(d0, d2);
        let segment = if v >= d1 { 1 } else { 0 };
        let (a, b) = (self.domain[segment], self.domain[segment + 1]);
        let (ra, rb) = (self.range[segment], self.range[segment + 1]);
        let (ta, tb) = (self.transform(a), self.transform(b));
        let denom = tb - ta;
        if denom == 0.0 || !denom.is_finite() {
            return ra;
        }
        let t = (self.transform(v) - ta) / denom;
        ra + t * (rb - ra)
    }

    /// Maps a range value back into the domain, clamping to the outer stops.
    pub fn invert(&self, r: f64) -> f64 {
        let [r0, r1, r2] = self.range;
        let ascending = r2 >= r0;
        let (lo, hi) = if ascending { (r0, r2) } else { (r2, r0) };
        let r = r.clamp(lo, hi);
        let past_mid = if ascending { r >= r1 } else { r <= r1 };
        let segment = usize::from(past_mid);
        let (ra, rb) = (self.range[segment], self.range[segment + 1]);
        let (ta, tb) = (
            self.transform(self.domain[segment]),
            self.transform(self.domain[segment + 1]),
        );
        if rb == ra {
            return self.domain[segment];
        }
        let t = (r - ra) / (rb - ra);
        self.untransform(ta + t * (tb - ta))
    }
}

/// The fill scale: a [`ScaleDiverging`] into `[0, 1]`-ish stops followed by a [`Palette`].
#[derive(Clone)]
pub struct FillScale {
    scale: ScaleDiverging,
    palette: Arc<dyn Palette>,
    missing: Color,
}

impl fmt::Debug for FillScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillScale")
            .field("scale", &self.scale)
            .field("missing", &self.missing)
            .finish_non_exhaustive()
    }
}

impl FillScale {
    /// Creates a fill scale.
    pub fn new(scale: ScaleDiverging, palette: Arc<dyn Palette>) -> Self {
        Self {
            scale,
            palette,
            missing: Color::TRANSPARENT,
        }
    }

    /// Sets the color used for non-finite values.
    pub fn with_missing(mut self, missing: Color) -> Self {
        self.missing = missing;
        self
    }

    /// Returns the underlying diverging scale.
    pub fn scale(&self) -> &ScaleDiverging {
        &self.scale
    }

    /// Maps a fill value to a color.
    pub fn color(&self, v: f64) -> Color {
        if !v.is_finite() {
            return self.missing;
        }
        self.palette.color(self.scale.map(v))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn point_scale_positions_are_monotonic() {
        let scale = ScalePoint::new((0.0, 100.0), 5);
        let a = scale.position(0);
        let b = scale.position(1);
        let c = scale.position(2);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(scale.index_at(b), Some(1));
    }

    #[test]
    fn log_scale_maps_endpoints_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(100.0) - 10.0).abs() < 1e-9);
        assert!((s.invert(5.0) - 10.0).abs() < 1e-9);
        assert_eq!(s.ticks(10), vec![1.0, 10.0, 100.0]);
    }

    #[test]
    fn linear_scale_inverts() {
        let s = ScaleLinear::new((10.0, 20.0), (100.0, 0.0));
        assert_eq!(s.map(15.0), 50.0);
        assert_eq!(s.invert(50.0), 15.0);
    }

    #[test]
    fn linear_ticks_stay_inside_domain() {
        let s = ScaleLinear::new((0.5, 9.5), (0.0, 1.0));
        let ticks = s.ticks(5);
        assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
        let reversed = ScaleLinear::new((9.5, 0.5), (0.0, 1.0)).ticks(5);
        assert_eq!(reversed, vec![8.0, 6.0, 4.0, 2.0]);
    }

    #[test]
    fn reversed_band_puts_first_key_at_bottom() {
        let keys = vec![Value::from("O3"), Value::from("SO2")];
        let s = ScaleCategorical::band(keys, (357.0, 23.0));
        assert_eq!(s.step(), 167.0);
        assert_eq!(s.map(&Value::from("O3")), Some(190.0));
        assert_eq!(s.map(&Value::from("SO2")), Some(23.0));
        assert_eq!(s.map(&Value::from("NO2")), None);
        assert_eq!(s.invert(200.0), Some(&Value::from("O3")));
        assert_eq!(s.invert(100.0), Some(&Value::from("SO2")));
        assert_eq!(s.invert(10.0), None);
    }

    #[test]
    fn bands_partition_the_range() {
        let keys: Vec<Value> = (0..7).map(|i| Value::Number(f64::from(i))).collect();
        let s = ScaleCategorical::band(keys.clone(), (300.0, 20.0));
        let mut edges: Vec<(f64, f64)> = keys
            .iter()
            .map(|k| {
                let y = s.map(k).unwrap();
                (y, y + s.step())
            })
            .collect();
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert!((edges[0].0 - 20.0).abs() < 1e-9);
        assert!((edges[edges.len() - 1].1 - 300.0).abs() < 1e-9);
        for w in edges.windows(2) {
            assert!((w[0].1 - w[1].0).abs() < 1e-9, "gap or overlap: {w:?}");
            assert!(((w[0].1 - w[0].0) - (w[1].1 - w[1].0)).abs() < 1e-9);
        }
    }

    #[test]
    fn point_scale_sits_at_band_centers() {
        let keys = vec![Value::from("a"), Value::from("b")];
        let band = ScaleCategorical::band(keys.clone(), (0.0, 100.0));
        let point = ScaleCategorical::new(YScaleKind::Point, keys, (0.0, 100.0));
        assert_eq!(point.step(), band.step());
        assert_eq!(point.position(0), band.position(0) + 0.5 * band.step());
        assert_eq!(point.band_width(), 0.0);
    }

    #[test]
    fn repeated_keys_share_one_band() {
        let keys = vec![Value::from("O3"), Value::from("SO2"), Value::from("O3")];
        let s = ScaleCategorical::band(keys, (357.0, 23.0));
        assert_eq!(s.keys(), &[Value::from("O3"), Value::from("SO2")]);
        assert_eq!(s.step(), 167.0);
        assert_eq!(s.map(&Value::from("O3")), Some(190.0));
    }

    #[test]
    fn diverging_scale_is_piecewise_and_clamped() {
        let s = ScaleDiverging::new([10.0, 40.0, 90.0], [0.0, 0.5, 1.0]);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(25.0), 0.25);
        assert_eq!(s.map(40.0), 0.5);
        assert_eq!(s.map(65.0), 0.75);
        assert_eq!(s.map(90.0), 1.0);
        assert_eq!(s.map(-1000.0), s.map(10.0));
        assert_eq!(s.map(1000.0), s.map(90.0));
        assert_eq!(s.invert(0.75), 65.0);
        assert_eq!(s.invert(2.0), 90.0);
    }

    #[test]
    fn descending_diverging_domain_flips() {
        let s = ScaleDiverging::new([90.0, 40.0, 10.0], [0.0, 0.5, 1.0]);
        assert_eq!(s.map(90.0), 0.0);
        assert_eq!(s.map(10.0), 1.0);
        assert_eq!(s.map(40.0), 0.5);
    }

    #[test]
    fn log_diverging_interpolates_in_log_space() {
        let s = ScaleDiverging::new([1.0, 10.0, 100.0], [0.0, 0.5, 1.0]).with_kind(FillScaleKind::Log);
        assert!((s.map(10.0) - 0.5).abs() < 1e-12);
        assert!((s.map(1000.0) - 1.0).abs() < 1e-12);
        assert!((s.invert(0.75) - 31.622_776_601_683_793).abs() < 1e-9);
    }
}

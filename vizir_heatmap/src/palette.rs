// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color palettes for the fill channel.
//!
//! A palette is any function from `t ∈ [0, 1]` to a color. The heatmap never looks inside
//! it; [`crate::FillScale`] maps a fill value to `t` and hands `t` to the palette.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use peniko::Color;

/// A mapping from the unit interval to colors.
pub trait Palette {
    /// Returns the color at `t` (callers pass values in `[0, 1]`).
    fn color(&self, t: f64) -> Color;
}

impl<F> Palette for F
where
    F: Fn(f64) -> Color,
{
    fn color(&self, t: f64) -> Color {
        self(t)
    }
}

/// A palette that linearly blends evenly spaced RGB stops.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    stops: Vec<[u8; 3]>,
}

impl ColorRamp {
    /// Creates a ramp from evenly spaced stops. An empty ramp renders black.
    pub fn new(stops: impl Into<Vec<[u8; 3]>>) -> Self {
        Self {
            stops: stops.into(),
        }
    }
}

impl Palette for ColorRamp {
    fn color(&self, t: f64) -> Color {
        let Some(&last) = self.stops.last() else {
            return Color::from_rgb8(0, 0, 0);
        };
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = (self.stops.len() - 1) as f64;
        let x = t * segments;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "x is in [0, stops.len() - 1] so the floor fits in usize"
        )]
        let i = x.floor() as usize;
        if i + 1 >= self.stops.len() {
            return Color::from_rgb8(last[0], last[1], last[2]);
        }
        let f = x - i as f64;
        let (a, b) = (self.stops[i], self.stops[i + 1]);
        Color::from_rgb8(lerp_u8(a[0], b[0], f), lerp_u8(a[1], b[1], f), lerp_u8(a[2], b[2], f))
    }
}

fn lerp_u8(a: u8, b: u8, f: f64) -> u8 {
    let v = f64::from(a) + f * (f64::from(b) - f64::from(a));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the u8 range")]
    {
        v.round().clamp(0.0, 255.0) as u8
    }
}

/// An approximation of the perceptually uniform, color-vision-deficiency friendly
/// "cividis" colormap (dark blue through grey to yellow). This is the default fill palette.
pub fn cividis() -> ColorRamp {
    ColorRamp::new([
        [0, 34, 78],
        [18, 53, 112],
        [59, 73, 108],
        [87, 92, 109],
        [112, 113, 115],
        [138, 134, 120],
        [167, 157, 117],
        [199, 182, 104],
        [254, 232, 56],
    ])
}

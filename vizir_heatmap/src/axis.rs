// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis descriptors.
//!
//! An axis is described, not drawn: the descriptor carries the scale, the resolved ticks
//! with their labels, and the placement hints a renderer needs (translation, gridline
//! length, title position). The heatmap uses a bottom x axis and a left y axis.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Point, Vec2};

use crate::format::{TickFormat, format_tick_with_step};
use crate::scale::{ScaleCategorical, ScaleContinuous};
use crate::time::format_time_ms;
use crate::{HeatmapError, HeatmapOptions, Value};

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Horizontal axis below the plot.
    Bottom,
    /// Vertical axis left of the plot.
    Left,
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The text starts at the anchor point.
    Start,
    /// The text is centered on the anchor point.
    Middle,
    /// The text ends at the anchor point.
    End,
}

/// One resolved tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// The domain value (a timestamp on temporal axes, a key on categorical ones).
    pub value: Value,
    /// Position along the axis in scene coordinates.
    pub position: f64,
    /// Label text.
    pub label: String,
}

/// An axis title and where to put it, relative to the axis translation.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    /// Title text.
    pub text: String,
    /// Anchor position.
    pub pos: Point,
    /// Horizontal anchoring at `pos`.
    pub anchor: TextAnchor,
    /// Font size.
    pub font_size: f64,
}

/// The scale an axis was built from.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// A continuous x scale.
    Continuous(ScaleContinuous),
    /// A categorical y scale.
    Categorical(ScaleCategorical),
}

/// Everything a renderer needs to draw one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisDescriptor {
    /// Placement.
    pub orient: AxisOrient,
    /// The scale the ticks were resolved with.
    pub scale: AxisScale,
    /// Translation applied to the whole axis group.
    pub offset: Vec2,
    /// Pixel range covered by the scale.
    pub range: (f64, f64),
    /// Requested tick count (advisory for categorical axes).
    pub tick_count: usize,
    /// Explicit tick format, if one was configured.
    pub format: Option<TickFormat>,
    /// Resolved ticks in axis order.
    pub ticks: Vec<Tick>,
    /// Signed gridline length, measured from the axis line across the plot.
    pub grid_length: f64,
    /// Whether the axis baseline is drawn.
    pub show_domain: bool,
    /// Tick label font size.
    pub tick_font_size: f64,
    /// Optional title.
    pub title: Option<AxisTitle>,
}

/// Roughly one tick per `spacing` pixels, and at least one.
pub fn tick_count(extent: f64, spacing: f64) -> usize {
    if !extent.is_finite() || !spacing.is_finite() || spacing <= 0.0 {
        return 1;
    }
    let n = (extent / spacing).floor().clamp(1.0, 1_000.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to [1, 1000]")]
    {
        n as usize
    }
}

/// The distance between the first two ticks, or `fallback` when there are fewer than two.
fn tick_step(ticks: &[f64], fallback: f64) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => fallback,
    }
}

fn parse_format(spec: Option<&str>, temporal: bool) -> Result<Option<TickFormat>, HeatmapError> {
    spec.map(|s| TickFormat::parse(s, temporal)).transpose()
}

impl AxisDescriptor {
    /// Builds the bottom x axis of a chart `width` pixels wide.
    pub fn x_axis(
        scale: ScaleContinuous,
        options: &HeatmapOptions,
        width: f64,
    ) -> Result<Self, HeatmapError> {
        let temporal = matches!(scale, ScaleContinuous::Time(_));
        let format = parse_format(options.x_format.as_deref(), temporal)?;
        let count = tick_count(width, options.x_tick_spacing);
        let values = scale.ticks(count);
        let (d0, d1) = scale.domain();
        let step = tick_step(&values, (d1 - d0).abs() / count as f64);

        let ticks = values
            .iter()
            .map(|&v| {
                let label = match (&format, scale) {
                    (Some(f), _) => f.format(v, step),
                    (None, ScaleContinuous::Time(_)) => format_time_ms(v, step),
                    // Powers of ten: precision follows the tick itself.
                    (None, ScaleContinuous::Log(_)) => format_tick_with_step(v, v),
                    (None, ScaleContinuous::Linear(_)) => format_tick_with_step(v, step),
                };
                Tick {
                    value: if temporal {
                        time_value(v)
                    } else {
                        Value::Number(v)
                    },
                    position: scale.map(v),
                    label,
                }
            })
            .collect();

        let m = options.margins;
        let title = options.x_label.as_ref().map(|text| AxisTitle {
            text: text.clone(),
            pos: Point::new(width, m.bottom - 4.0),
            anchor: TextAnchor::End,
            font_size: options.font_size,
        });

        Ok(Self {
            orient: AxisOrient::Bottom,
            range: scale.range(),
            scale: AxisScale::Continuous(scale),
            offset: Vec2::new(0.0, options.height - m.bottom),
            tick_count: count,
            format,
            ticks,
            grid_length: m.top + m.bottom - options.height,
            show_domain: true,
            tick_font_size: options.font_size * options.font_tick_reducer,
            title,
        })
    }

    /// Builds the left y axis of a chart `width` pixels wide.
    ///
    /// There is one tick per key, at the center of its band.
    pub fn y_axis(
        scale: ScaleCategorical,
        options: &HeatmapOptions,
        width: f64,
    ) -> Result<Self, HeatmapError> {
        let temporal = !scale.keys().is_empty() && scale.keys().iter().all(Value::is_time);
        let format = parse_format(options.y_format.as_deref(), temporal)?;
        let count = tick_count(options.height, options.y_tick_spacing);
        let half_band = 0.5 * scale.band_width();

        let ticks = scale
            .keys()
            .iter()
            .enumerate()
            .map(|(i, key)| Tick {
                value: key.clone(),
                position: scale.position(i) + half_band,
                label: match &format {
                    Some(f) => f.format_value(key),
                    None => key.to_string(),
                },
            })
            .collect();

        let m = options.margins;
        let title = options.y_label.as_ref().map(|text| AxisTitle {
            text: text.clone(),
            pos: Point::new(-m.left, 10.0),
            anchor: TextAnchor::Start,
            font_size: options.font_size,
        });

        Ok(Self {
            orient: AxisOrient::Left,
            range: scale.range(),
            scale: AxisScale::Categorical(scale),
            offset: Vec2::new(m.left, 0.0),
            tick_count: count,
            format,
            ticks,
            grid_length: width - m.left - m.right,
            show_domain: false,
            tick_font_size: options.font_size * options.font_tick_reducer,
            title,
        })
    }
}

fn time_value(ms: f64) -> Value {
    let ms = ms.round().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let ms = ms as i64;
    Value::Time(ms)
}

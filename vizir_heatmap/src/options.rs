// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap configuration.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use peniko::Color;
use peniko::color::palette::css;

use crate::{
    FillDomain, FillScaleKind, MS_PER_DAY, Palette, ResponsiveWidth, Sides, Value, XDomain,
    XScaleKind, YScaleKind, cividis,
};

/// Every knob of the heatmap, with its default.
///
/// Built with `HeatmapOptions::default()` and the `with_*` methods.
#[derive(Clone)]
pub struct HeatmapOptions {
    /// Space reserved around the plot for axes.
    pub margins: Sides,
    /// Extra space between the plot edges and the scale ranges.
    pub insets: Sides,
    /// Configured outer width, before the responsive adjustment.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Responsive width policy.
    pub responsive: ResponsiveWidth,
    /// Explicit x domain; derived from the data when `None`.
    pub x_domain: Option<XDomain>,
    /// Explicit ordered y keys; derived from the data when `None`.
    pub y_domain: Option<Vec<Value>>,
    /// Explicit fill stops; derived from the data when `None`.
    pub fill_domain: Option<FillDomain>,
    /// Middle fill stop used when deriving the fill domain.
    pub target_limit: Option<f64>,
    /// x scale type.
    pub x_scale: XScaleKind,
    /// y scale type.
    pub y_scale: YScaleKind,
    /// Fill interpolation.
    pub fill_scale: FillScaleKind,
    /// Range stops the fill domain maps onto before the palette.
    pub fill_range: [f64; 3],
    /// Fill palette.
    pub fill_palette: Arc<dyn Palette>,
    /// Color for non-finite fill values.
    pub missing_fill: Color,
    /// x axis title.
    pub x_label: Option<String>,
    /// y axis title.
    pub y_label: Option<String>,
    /// x tick format (numeric specifier, or strftime for temporal axes).
    pub x_format: Option<String>,
    /// y tick format.
    pub y_format: Option<String>,
    /// Base font size.
    pub font_size: f64,
    /// Tick labels use `font_size * font_tick_reducer`.
    pub font_tick_reducer: f64,
    /// Vertical gap between a tile and its band edges.
    pub rect_y_padding: f64,
    /// Tile stroke width.
    pub stroke_width: f64,
    /// Halo color behind text.
    pub halo: Color,
    /// Halo stroke width.
    pub halo_width: f64,
    /// Length of one tile along x, in x-domain units (one day for ms timestamps).
    pub x_unit: f64,
    /// Pixels per x tick.
    pub x_tick_spacing: f64,
    /// Pixels per y tick.
    pub y_tick_spacing: f64,
}

impl fmt::Debug for HeatmapOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeatmapOptions")
            .field("margins", &self.margins)
            .field("insets", &self.insets)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("responsive", &self.responsive)
            .field("x_domain", &self.x_domain)
            .field("y_domain", &self.y_domain)
            .field("fill_domain", &self.fill_domain)
            .field("target_limit", &self.target_limit)
            .field("x_scale", &self.x_scale)
            .field("y_scale", &self.y_scale)
            .field("fill_scale", &self.fill_scale)
            .field("fill_range", &self.fill_range)
            .field("missing_fill", &self.missing_fill)
            .field("x_label", &self.x_label)
            .field("y_label", &self.y_label)
            .field("x_format", &self.x_format)
            .field("y_format", &self.y_format)
            .field("x_unit", &self.x_unit)
            .finish_non_exhaustive()
    }
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            margins: Sides::new(20.0, 0.0, 40.0, 40.0),
            insets: Sides::uniform(3.0),
            width: 640.0,
            height: 400.0,
            responsive: ResponsiveWidth::default(),
            x_domain: None,
            y_domain: None,
            fill_domain: None,
            target_limit: None,
            x_scale: XScaleKind::default(),
            y_scale: YScaleKind::default(),
            fill_scale: FillScaleKind::default(),
            fill_range: [0.0, 0.5, 1.0],
            fill_palette: Arc::new(cividis()),
            missing_fill: Color::TRANSPARENT,
            x_label: None,
            y_label: None,
            x_format: None,
            y_format: None,
            font_size: 14.0,
            font_tick_reducer: 0.9,
            rect_y_padding: 4.0,
            stroke_width: 0.5,
            halo: css::WHITE,
            halo_width: 3.0,
            x_unit: MS_PER_DAY,
            x_tick_spacing: 80.0,
            y_tick_spacing: 50.0,
        }
    }
}

impl HeatmapOptions {
    /// Sets the margins.
    pub fn with_margins(mut self, margins: Sides) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the insets.
    pub fn with_insets(mut self, insets: Sides) -> Self {
        self.insets = insets;
        self
    }

    /// Sets the configured outer size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the responsive width policy.
    pub fn with_responsive(mut self, responsive: ResponsiveWidth) -> Self {
        self.responsive = responsive;
        self
    }

    /// Fixes the x domain.
    pub fn with_x_domain(mut self, domain: XDomain) -> Self {
        self.x_domain = Some(domain);
        self
    }

    /// Fixes the y keys and their bottom-to-top order.
    pub fn with_y_domain(mut self, keys: Vec<Value>) -> Self {
        self.y_domain = Some(keys);
        self
    }

    /// Fixes the fill stops.
    pub fn with_fill_domain(mut self, domain: FillDomain) -> Self {
        self.fill_domain = Some(domain);
        self
    }

    /// Sets the threshold used as the middle fill stop.
    pub fn with_target_limit(mut self, target: f64) -> Self {
        self.target_limit = Some(target);
        self
    }

    /// Sets the x scale type.
    pub fn with_x_scale(mut self, kind: XScaleKind) -> Self {
        self.x_scale = kind;
        self
    }

    /// Sets the y scale type.
    pub fn with_y_scale(mut self, kind: YScaleKind) -> Self {
        self.y_scale = kind;
        self
    }

    /// Sets the fill interpolation.
    pub fn with_fill_scale(mut self, kind: FillScaleKind) -> Self {
        self.fill_scale = kind;
        self
    }

    /// Sets the fill range stops.
    pub fn with_fill_range(mut self, range: [f64; 3]) -> Self {
        self.fill_range = range;
        self
    }

    /// Sets the fill palette.
    pub fn with_palette(mut self, palette: impl Palette + 'static) -> Self {
        self.fill_palette = Arc::new(palette);
        self
    }

    /// Sets the color used for non-finite fill values.
    pub fn with_missing_fill(mut self, color: Color) -> Self {
        self.missing_fill = color;
        self
    }

    /// Sets the x axis title.
    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Sets the y axis title.
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Sets the x tick format.
    pub fn with_x_format(mut self, format: impl Into<String>) -> Self {
        self.x_format = Some(format.into());
        self
    }

    /// Sets the y tick format.
    pub fn with_y_format(mut self, format: impl Into<String>) -> Self {
        self.y_format = Some(format.into());
        self
    }

    /// Sets the base font size and the tick label reduction factor.
    pub fn with_font(mut self, font_size: f64, font_tick_reducer: f64) -> Self {
        self.font_size = font_size;
        self.font_tick_reducer = font_tick_reducer;
        self
    }

    /// Sets the vertical tile padding.
    pub fn with_rect_y_padding(mut self, padding: f64) -> Self {
        self.rect_y_padding = padding;
        self
    }

    /// Sets the tile stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Sets the text halo.
    pub fn with_halo(mut self, color: Color, width: f64) -> Self {
        self.halo = color;
        self.halo_width = width;
        self
    }

    /// Sets the tile length along x, in x-domain units.
    pub fn with_x_unit(mut self, unit: f64) -> Self {
        self.x_unit = unit;
        self
    }

    /// Sets the pixel spacing used to derive tick counts.
    pub fn with_tick_spacing(mut self, x: f64, y: f64) -> Self {
        self.x_tick_spacing = x;
        self.y_tick_spacing = y;
        self
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembled output of [`crate::Heatmap::build`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;

use crate::{AxisDescriptor, FillDomain, Geometry, Sides, Size};

/// One colored cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Index of the source record.
    pub index: usize,
    /// Tile bounds in scene coordinates.
    pub rect: Rect,
    /// Fill color.
    pub fill: Color,
    /// Stroke color (the same as the fill, so adjacent tiles close hairline gaps).
    pub stroke: Color,
    /// Tooltip text.
    pub title: Option<String>,
}

/// Rendering hints that do not affect layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    /// Tile stroke width.
    pub stroke_width: f64,
    /// Halo color behind axis text.
    pub halo: Color,
    /// Halo stroke width.
    pub halo_width: f64,
    /// Base font size.
    pub font_size: f64,
}

/// A complete, backend-agnostic description of one heatmap.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Outer size after the responsive width adjustment.
    pub size: Size,
    /// Outer bounds, `(0, 0)` to `size`.
    pub view: Rect,
    /// The rectangle inside the margins.
    pub plot: Rect,
    /// Margins the layout was computed with.
    pub margins: Sides,
    /// One tile per record, in record order.
    pub tiles: Vec<Tile>,
    /// Bottom axis.
    pub x_axis: AxisDescriptor,
    /// Left axis.
    pub y_axis: AxisDescriptor,
    /// Shared tile dimensions.
    pub geometry: Geometry,
    /// The fill domain the colors were computed from.
    pub fill_domain: FillDomain,
    /// Rendering hints.
    pub style: SceneStyle,
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer size, margins and insets.
//!
//! The heatmap uses a fixed-margin layout: margins reserve room for the axes around the
//! plot rectangle, and insets pull the scale ranges inward from the plot edges so edge
//! tiles do not touch the axis lines.

use kurbo::Rect;

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in scene coordinates.
    pub width: f64,
    /// Height in scene coordinates.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side lengths, used for margins and insets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sides {
    /// Top side.
    pub top: f64,
    /// Right side.
    pub right: f64,
    /// Bottom side.
    pub bottom: f64,
    /// Left side.
    pub left: f64,
}

impl Sides {
    /// Creates per-side lengths in CSS order.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same length on every side.
    pub fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
}

/// How the outer width reacts to the host display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponsiveWidth {
    /// Widths below this are raised to it.
    pub min_width: f64,
    /// Displays at least this wide use `columns_ratio` of the configured width.
    pub column_width: f64,
    /// Fraction of the configured width used on wide displays.
    pub columns_ratio: f64,
}

impl Default for ResponsiveWidth {
    fn default() -> Self {
        Self {
            min_width: 375.0,
            column_width: 1200.0,
            columns_ratio: 8.0 / 12.0,
        }
    }
}

impl ResponsiveWidth {
    /// Resolves the outer width for an optional display width.
    ///
    /// On a display at least `column_width` wide the chart takes `columns_ratio` of
    /// `width`; otherwise `width` is raised to `min_width`. Without a display width only
    /// the minimum applies.
    pub fn resolve(&self, width: f64, display_width: Option<f64>) -> f64 {
        match display_width {
            Some(display) if display >= self.column_width => width * self.columns_ratio,
            _ => width.max(self.min_width),
        }
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeatmapLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The rectangle inside the margins.
    pub plot: Rect,
    /// The plot rectangle further shrunk by the insets; scale ranges span this.
    pub data: Rect,
}

impl HeatmapLayout {
    /// Computes a layout for the given outer size.
    pub fn arrange(size: Size, margins: Sides, insets: Sides) -> Self {
        let view = Rect::new(0.0, 0.0, size.width, size.height);
        let plot = Rect::new(
            margins.left,
            margins.top,
            size.width - margins.right,
            size.height - margins.bottom,
        );
        let data = Rect::new(
            plot.x0 + insets.left,
            plot.y0 + insets.top,
            plot.x1 - insets.right,
            plot.y1 - insets.bottom,
        );
        Self { view, plot, data }
    }

    /// The x pixel range, `[left, right]`.
    pub fn x_range(&self) -> (f64, f64) {
        (self.data.x0, self.data.x1)
    }

    /// The y pixel range, `[bottom, top]`: increasing band index moves up the screen.
    pub fn y_range(&self) -> (f64, f64) {
        (self.data.y1, self.data.y0)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn ranges_apply_margins_and_insets() {
        let layout = HeatmapLayout::arrange(
            Size::new(640.0, 400.0),
            Sides::new(20.0, 0.0, 40.0, 40.0),
            Sides::uniform(3.0),
        );
        assert_eq!(layout.x_range(), (43.0, 637.0));
        assert_eq!(layout.y_range(), (357.0, 23.0));
        assert_eq!(layout.plot, Rect::new(40.0, 20.0, 640.0, 360.0));
    }

    #[test]
    fn responsive_width_uses_injected_display() {
        let r = ResponsiveWidth::default();
        assert!((r.resolve(640.0, Some(1920.0)) - 640.0 * 8.0 / 12.0).abs() < 1e-9);
        assert_eq!(r.resolve(640.0, Some(800.0)), 640.0);
        assert_eq!(r.resolve(300.0, Some(800.0)), 375.0);
        assert_eq!(r.resolve(300.0, None), 375.0);
        assert_eq!(r.resolve(640.0, None), 640.0);
    }
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile sizing.
//!
//! Every tile has the same size. Its width is one `x_unit` of the x domain (one day for
//! millisecond timestamps) in pixels; its height is the band step less the vertical padding.

use crate::HeatmapError;

/// Shared tile dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Tile width in pixels.
    pub tile_width: f64,
    /// Tile height in pixels.
    pub tile_height: f64,
    /// Gap between a tile and each edge of its band.
    pub padding: f64,
    /// Number of `x_unit`s in the x domain.
    pub unit_count: f64,
}

impl Geometry {
    /// Computes the tile size.
    ///
    /// `x_bounds` is the x domain on the number line, `x_range` the pixel range it maps to,
    /// and `step` the y band step.
    pub fn compute(
        x_bounds: (f64, f64),
        x_unit: f64,
        x_range: (f64, f64),
        step: f64,
        padding: f64,
    ) -> Result<Self, HeatmapError> {
        let span = x_bounds.1 - x_bounds.0;
        let unit_count = span / x_unit;
        if !unit_count.is_finite() || unit_count <= 0.0 {
            return Err(HeatmapError::InvalidGeometryDomain { span, unit_count });
        }
        let tile_width = (x_range.1 - x_range.0).abs() / unit_count;

        let mut tile_height = step - 2.0 * padding;
        if tile_height < 0.0 {
            log::warn!(
                "rect_y_padding {padding} exceeds half the band step {step}; tile height clamped to 0"
            );
            tile_height = 0.0;
        }

        let geometry = Self {
            tile_width,
            tile_height,
            padding,
            unit_count,
        };
        log::debug!("heatmap geometry: {geometry:?}");
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::MS_PER_DAY;

    #[test]
    fn one_day_spans_the_whole_range() {
        let g = Geometry::compute((0.0, MS_PER_DAY), MS_PER_DAY, (43.0, 637.0), 167.0, 4.0).unwrap();
        assert_eq!(g.unit_count, 1.0);
        assert_eq!(g.tile_width, 594.0);
        assert_eq!(g.tile_height, 159.0);
    }

    #[test]
    fn width_divides_by_day_count() {
        let g = Geometry::compute((0.0, 4.0 * MS_PER_DAY), MS_PER_DAY, (0.0, 400.0), 10.0, 1.0)
            .unwrap();
        assert_eq!(g.tile_width, 100.0);
        assert_eq!(g.tile_height, 8.0);
    }

    #[test]
    fn empty_or_reversed_span_is_rejected() {
        for bounds in [(5.0, 5.0), (10.0, 0.0)] {
            assert!(matches!(
                Geometry::compute(bounds, MS_PER_DAY, (0.0, 100.0), 10.0, 1.0),
                Err(HeatmapError::InvalidGeometryDomain { .. })
            ));
        }
        assert!(matches!(
            Geometry::compute((0.0, 1.0), 0.0, (0.0, 100.0), 10.0, 1.0),
            Err(HeatmapError::InvalidGeometryDomain { .. })
        ));
    }

    #[test]
    fn oversized_padding_clamps_height() {
        let g = Geometry::compute((0.0, 1.0), 1.0, (0.0, 10.0), 6.0, 4.0).unwrap();
        assert_eq!(g.tile_height, 0.0);
    }
}

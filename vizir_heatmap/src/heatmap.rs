// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The heatmap pipeline.
//!
//! [`Heatmap::build`] runs every stage in order and owns nothing between calls:
//! records → [`Series`] → [`Domains`] → scales → [`Geometry`] → axes → [`Scene`].

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::axis::AxisDescriptor;
use crate::domain::finite_f64;
use crate::{
    Accessors, Channel, Domains, FillDomain, FillScale, FillScaleKind, Geometry, HeatmapError,
    HeatmapLayout, HeatmapOptions, ScaleCategorical, ScaleContinuous, ScaleDiverging, ScaleLinear,
    ScaleLog, ScaleTime, Scene, SceneStyle, Series, Size, Tile, XDomain, XScaleKind, extract,
};

/// A configured heatmap.
#[derive(Clone, Debug, Default)]
pub struct Heatmap {
    options: HeatmapOptions,
}

impl Heatmap {
    /// Creates a heatmap with the given options.
    pub fn new(options: HeatmapOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    pub fn options(&self) -> &HeatmapOptions {
        &self.options
    }

    /// Lays out `data` and returns the scene.
    ///
    /// `display_width` is the width of the host display, if known; it only feeds the
    /// responsive width rule. The same inputs always produce an equal scene.
    pub fn build<R>(
        &self,
        data: &[R],
        accessors: &Accessors<'_, R>,
        display_width: Option<f64>,
    ) -> Result<Scene, HeatmapError> {
        let options = &self.options;
        let series = extract(data, accessors)?;
        let domains = Domains::resolve(&series, options)?;

        let width = options.responsive.resolve(options.width, display_width);
        let size = Size::new(width, options.height);
        let layout = HeatmapLayout::arrange(size, options.margins, options.insets);
        log::debug!(
            "heatmap ranges: width = {width}, x = {:?}, y = {:?}",
            layout.x_range(),
            layout.y_range()
        );

        let x_scale = self.x_scale(&domains.x, layout.x_range())?;
        let y_scale = ScaleCategorical::new(options.y_scale, domains.y.clone(), layout.y_range());
        log::trace!("y scale: {} keys, step {}", y_scale.keys().len(), y_scale.step());
        let fill_scale = self.fill_scale(&domains.fill)?;

        let geometry = Geometry::compute(
            domains.x.bounds()?,
            options.x_unit,
            layout.x_range(),
            y_scale.step(),
            options.rect_y_padding,
        )?;

        let tiles = tiles(&series, &x_scale, &y_scale, &fill_scale, &geometry)?;
        let x_axis = AxisDescriptor::x_axis(x_scale, options, width)?;
        let y_axis = AxisDescriptor::y_axis(y_scale, options, width)?;

        Ok(Scene {
            size,
            view: layout.view,
            plot: layout.plot,
            margins: options.margins,
            tiles,
            x_axis,
            y_axis,
            geometry,
            fill_domain: domains.fill,
            style: SceneStyle {
                stroke_width: options.stroke_width,
                halo: options.halo,
                halo_width: options.halo_width,
                font_size: options.font_size,
            },
        })
    }

    fn x_scale(&self, domain: &XDomain, range: (f64, f64)) -> Result<ScaleContinuous, HeatmapError> {
        let bounds = domain.bounds()?;
        let kind = match self.options.x_scale {
            XScaleKind::Auto if domain.is_temporal() => XScaleKind::Time,
            XScaleKind::Auto => XScaleKind::Linear,
            kind => kind,
        };
        let scale = match kind {
            XScaleKind::Log => {
                if !(bounds.0 > 0.0 && bounds.1 > 0.0) {
                    return Err(HeatmapError::NonPositiveLogDomain { channel: Channel::X });
                }
                ScaleContinuous::Log(ScaleLog::new(bounds, range))
            }
            XScaleKind::Time => ScaleContinuous::Time(ScaleTime::new(bounds, range)),
            XScaleKind::Auto | XScaleKind::Linear => {
                ScaleContinuous::Linear(ScaleLinear::new(bounds, range))
            }
        };
        log::trace!("x scale: {scale:?}");
        Ok(scale)
    }

    fn fill_scale(&self, domain: &FillDomain) -> Result<FillScale, HeatmapError> {
        let options = &self.options;
        let finite = domain.min.is_finite()
            && domain.max.is_finite()
            && domain.mid.is_none_or(f64::is_finite);
        if !finite {
            return Err(HeatmapError::InvalidFillDomain {
                min: domain.min,
                mid: domain.mid,
                max: domain.max,
            });
        }
        if options.fill_scale == FillScaleKind::Log && !(domain.min > 0.0 && domain.max > 0.0) {
            return Err(HeatmapError::NonPositiveLogDomain {
                channel: Channel::Fill,
            });
        }
        if let Some(mid) = domain.mid {
            let (lo, hi) = (domain.min.min(domain.max), domain.min.max(domain.max));
            if !(lo..=hi).contains(&mid) {
                log::warn!("fill target {mid} lies outside [{lo}, {hi}] and is clamped");
            }
        }
        let scale = ScaleDiverging::from_fill_domain(domain, options.fill_range)
            .with_kind(options.fill_scale);
        log::trace!("fill scale: {scale:?}");
        Ok(FillScale::new(scale, options.fill_palette.clone()).with_missing(options.missing_fill))
    }
}

fn tiles(
    series: &Series,
    x_scale: &ScaleContinuous,
    y_scale: &ScaleCategorical,
    fill_scale: &FillScale,
    geometry: &Geometry,
) -> Result<Vec<Tile>, HeatmapError> {
    // Band scales map to the band edge; point scales to its center.
    let edge_offset = 0.5 * (y_scale.step() - y_scale.band_width());
    series
        .indices()
        .map(|index| {
            let x = x_scale.map(finite_f64(Channel::X, index, &series.x[index])?);
            let key = &series.y[index];
            let band = y_scale
                .map(key)
                .ok_or_else(|| HeatmapError::UnknownCategory {
                    index,
                    value: key.clone(),
                })?
                - edge_offset;
            let value = &series.fill[index];
            let v = value.as_f64().ok_or_else(|| HeatmapError::NonQuantitative {
                channel: Channel::Fill,
                index: Some(index),
                value: value.clone(),
            })?;
            let color = fill_scale.color(v);
            let y = band + geometry.padding;
            Ok(Tile {
                index,
                rect: Rect::new(x, y, x + geometry.tile_width, y + geometry.tile_height),
                fill: color,
                stroke: color,
                title: series.title[index].clone(),
            })
        })
        .collect()
}

// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap layout and scales.
//!
//! This crate turns a slice of records into a backend-agnostic [`Scene`]: one colored
//! [`Tile`] per record plus two [`AxisDescriptor`]s. Each record is read through
//! [`Accessors`] into:
//! - a continuous **x** position (numbers or UTC timestamps),
//! - a categorical **y** band,
//! - a quantitative **fill** value, colored through a three-stop diverging scale and a
//!   [`Palette`].
//!
//! Domains are derived from the data unless given in [`HeatmapOptions`]. Drawing is out of
//! scope; the scene only carries geometry, colors and tick metadata.
//!
//! ```
//! use vizir_heatmap::{Accessors, Heatmap, HeatmapOptions, MS_PER_DAY, Value};
//!
//! let day = MS_PER_DAY as i64;
//! let data = [
//!     (Value::Time(0), "O3", 10.0),
//!     (Value::Time(day), "O3", 90.0),
//!     (Value::Time(0), "SO2", 40.0),
//! ];
//! type Row = (Value, &'static str, f64);
//! let accessors: Accessors<'_, Row> =
//!     Accessors::map(|r: &Row| r.0.clone(), |r: &Row| r.1, |r: &Row| r.2);
//! let heatmap = Heatmap::new(HeatmapOptions::default().with_target_limit(40.0));
//! let scene = heatmap.build(&data, &accessors, None).unwrap();
//! assert_eq!(scene.tiles.len(), 3);
//! ```

#![no_std]

extern crate alloc;

mod accessor;
mod axis;
mod domain;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod heatmap;
#[cfg(test)]
mod heatmap_tests;
mod layout;
mod options;
mod palette;
mod scale;
mod scene;
mod time;
mod value;

pub use accessor::{Accessors, Series, TupleRecord, extract};
pub use axis::{AxisDescriptor, AxisOrient, AxisScale, AxisTitle, TextAnchor, Tick, tick_count};
pub use domain::{Domains, FillDomain, XDomain, derive_fill_domain, derive_x_domain, derive_y_domain};
pub use error::{AccessorError, Channel, HeatmapError};
pub use format::{NumberFormat, NumberKind, TickFormat, TimeFormat, format_tick_with_step};
pub use geometry::Geometry;
pub use heatmap::Heatmap;
pub use layout::{HeatmapLayout, ResponsiveWidth, Sides, Size};
pub use options::HeatmapOptions;
pub use palette::{ColorRamp, Palette, cividis};
pub use scale::{
    FillScale, FillScaleKind, ScaleBand, ScaleCategorical, ScaleContinuous, ScaleDiverging,
    ScaleLinear, ScaleLog, ScalePoint, ScaleTime, XScaleKind, YScaleKind,
};
pub use scene::{Scene, SceneStyle, Tile};
pub use time::{format_time_ms, nice_time_ticks_ms};
pub use value::{MS_PER_DAY, Value};

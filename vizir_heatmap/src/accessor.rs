// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-record value extraction.
//!
//! Records are opaque to the pipeline: every value it reads goes through an accessor.
//! [`extract`] runs the accessors once per record and produces a [`Series`], the parallel
//! column view every later stage works from.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::{AccessorError, Channel, HeatmapError, Value};

type AccessorFn<'a, R> = Box<dyn Fn(&R) -> Result<Value, AccessorError> + 'a>;

/// Records addressable by position, used by the default accessors.
pub trait TupleRecord {
    /// Returns the element at `position`, if present.
    fn element(&self, position: usize) -> Option<Value>;
}

impl<A, B> TupleRecord for (A, B)
where
    A: Clone + Into<Value>,
    B: Clone + Into<Value>,
{
    fn element(&self, position: usize) -> Option<Value> {
        match position {
            0 => Some(self.0.clone().into()),
            1 => Some(self.1.clone().into()),
            _ => None,
        }
    }
}

impl<A, B, C> TupleRecord for (A, B, C)
where
    A: Clone + Into<Value>,
    B: Clone + Into<Value>,
    C: Clone + Into<Value>,
{
    fn element(&self, position: usize) -> Option<Value> {
        match position {
            0 => Some(self.0.clone().into()),
            1 => Some(self.1.clone().into()),
            2 => Some(self.2.clone().into()),
            _ => None,
        }
    }
}

impl<const N: usize> TupleRecord for [Value; N] {
    fn element(&self, position: usize) -> Option<Value> {
        self.get(position).cloned()
    }
}

impl TupleRecord for Vec<Value> {
    fn element(&self, position: usize) -> Option<Value> {
        self.get(position).cloned()
    }
}

/// The x/y/fill/title projections applied to each record.
pub struct Accessors<'a, R> {
    x: AccessorFn<'a, R>,
    y: AccessorFn<'a, R>,
    fill: AccessorFn<'a, R>,
    title: Option<AccessorFn<'a, R>>,
}

impl<R> fmt::Debug for Accessors<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors")
            .field("title", &self.title.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, R> Accessors<'a, R> {
    /// Creates accessors from fallible projections.
    ///
    /// An error returned by any projection is passed through unchanged inside
    /// [`HeatmapError::Accessor`].
    pub fn new(
        x: impl Fn(&R) -> Result<Value, AccessorError> + 'a,
        y: impl Fn(&R) -> Result<Value, AccessorError> + 'a,
        fill: impl Fn(&R) -> Result<Value, AccessorError> + 'a,
    ) -> Self {
        Self {
            x: Box::new(x),
            y: Box::new(y),
            fill: Box::new(fill),
            title: None,
        }
    }

    /// Creates accessors from infallible projections.
    pub fn map<X, Y, F>(
        x: impl Fn(&R) -> X + 'a,
        y: impl Fn(&R) -> Y + 'a,
        fill: impl Fn(&R) -> F + 'a,
    ) -> Self
    where
        X: Into<Value>,
        Y: Into<Value>,
        F: Into<Value>,
    {
        Self::new(
            move |r| Ok(x(r).into()),
            move |r| Ok(y(r).into()),
            move |r| Ok(fill(r).into()),
        )
    }

    /// Replaces the x projection.
    pub fn with_x(mut self, x: impl Fn(&R) -> Result<Value, AccessorError> + 'a) -> Self {
        self.x = Box::new(x);
        self
    }

    /// Replaces the y projection.
    pub fn with_y(mut self, y: impl Fn(&R) -> Result<Value, AccessorError> + 'a) -> Self {
        self.y = Box::new(y);
        self
    }

    /// Replaces the fill projection.
    pub fn with_fill(mut self, fill: impl Fn(&R) -> Result<Value, AccessorError> + 'a) -> Self {
        self.fill = Box::new(fill);
        self
    }

    /// Sets a title projection; its value is rendered with `Display` onto each tile.
    pub fn with_title(mut self, title: impl Fn(&R) -> Result<Value, AccessorError> + 'a) -> Self {
        self.title = Some(Box::new(title));
        self
    }
}

impl<'a, R: TupleRecord + 'a> Accessors<'a, R> {
    /// Positional accessors: x is element 0, y is element 1.
    ///
    /// Fill also reads element 1, so without a [`Accessors::with_fill`] override the fill
    /// channel aliases y even when records carry a third element. This mirrors the
    /// long-standing default for two-element records and is kept as is.
    pub fn tuple() -> Self {
        Self::new(|r| positional(r, 0), |r| positional(r, 1), |r| positional(r, 1))
    }
}

impl<'a, R: TupleRecord + 'a> Default for Accessors<'a, R> {
    fn default() -> Self {
        Self::tuple()
    }
}

fn positional<R: TupleRecord>(record: &R, position: usize) -> Result<Value, AccessorError> {
    record
        .element(position)
        .ok_or(AccessorError::MissingElement(position))
}

/// Parallel per-record columns.
///
/// Every column has one entry per input record and entry `i` of each column belongs to
/// record `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Horizontal position values.
    pub x: Vec<Value>,
    /// Categorical keys.
    pub y: Vec<Value>,
    /// Color values.
    pub fill: Vec<Value>,
    /// Tile titles (all `None` without a title accessor).
    pub title: Vec<Option<String>>,
}

impl Series {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The index sequence `0..len`.
    pub fn indices(&self) -> core::ops::Range<usize> {
        0..self.len()
    }
}

/// Runs the accessors over `data`, preserving record order.
pub fn extract<R>(data: &[R], accessors: &Accessors<'_, R>) -> Result<Series, HeatmapError> {
    let n = data.len();
    let mut series = Series {
        x: Vec::with_capacity(n),
        y: Vec::with_capacity(n),
        fill: Vec::with_capacity(n),
        title: Vec::with_capacity(n),
    };
    for (index, record) in data.iter().enumerate() {
        series.x.push(read(&accessors.x, record, Channel::X, index)?);
        series.y.push(read(&accessors.y, record, Channel::Y, index)?);
        series
            .fill
            .push(read(&accessors.fill, record, Channel::Fill, index)?);
        let title = match &accessors.title {
            Some(f) => Some(read(f, record, Channel::Title, index)?.to_string()),
            None => None,
        };
        series.title.push(title);
    }
    Ok(series)
}

fn read<R>(
    f: &AccessorFn<'_, R>,
    record: &R,
    channel: Channel,
    index: usize,
) -> Result<Value, HeatmapError> {
    f(record).map_err(|source| HeatmapError::Accessor {
        channel,
        index,
        source,
    })
}

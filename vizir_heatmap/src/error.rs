// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by [`crate::Heatmap::build`].

extern crate alloc;

use alloc::string::String;
use core::fmt;

use thiserror::Error;

use crate::Value;

/// The encoding channel an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical (categorical) position.
    Y,
    /// Tile color.
    Fill,
    /// Tile title.
    Title,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Fill => "fill",
            Self::Title => "title",
        })
    }
}

/// An error returned by a user-supplied accessor.
///
/// The pipeline never inspects or rewrites these; they are wrapped in
/// [`HeatmapError::Accessor`] together with the channel and record index.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessorError {
    /// A positional record has no element at the requested position.
    #[error("record has no element at position {0}")]
    MissingElement(usize),
    /// A free-form failure reported by the accessor.
    #[error("{0}")]
    Custom(String),
}

impl AccessorError {
    /// Convenience constructor for [`AccessorError::Custom`].
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Errors produced while building a heatmap scene.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum HeatmapError {
    /// A continuous domain was requested from a series with no usable values.
    #[error("cannot derive the {channel} domain from an empty series")]
    EmptyDomain {
        /// The channel whose domain was requested.
        channel: Channel,
    },
    /// The x domain does not span a positive, finite number of tile units.
    #[error("x domain spans {unit_count} tile units ({span} in domain units); expected a positive finite span")]
    InvalidGeometryDomain {
        /// Domain span (`max - min`) in domain units.
        span: f64,
        /// Span divided by the tile unit.
        unit_count: f64,
    },
    /// An accessor failed for a record.
    #[error("{channel} accessor failed for record {index}")]
    Accessor {
        /// The channel whose accessor failed.
        channel: Channel,
        /// Index of the record in the input data.
        index: usize,
        /// The accessor's own error.
        #[source]
        source: AccessorError,
    },
    /// A continuous channel received a value with no position on the number line.
    #[error("{channel} value {value} is not numeric or temporal")]
    NonQuantitative {
        /// The offending channel.
        channel: Channel,
        /// Record index, or `None` for an explicitly configured domain.
        index: Option<usize>,
        /// The rejected value.
        value: Value,
    },
    /// A position channel received `NaN` or an infinity.
    #[error("{channel} value for record {index} is not finite")]
    NonFinite {
        /// The offending channel.
        channel: Channel,
        /// Index of the record in the input data.
        index: usize,
    },
    /// A y value is not a member of the y domain.
    #[error("y value {value} for record {index} is not in the y domain")]
    UnknownCategory {
        /// Index of the record in the input data.
        index: usize,
        /// The unmatched key.
        value: Value,
    },
    /// The fill domain has a non-finite stop.
    #[error("fill domain ({min}, {mid:?}, {max}) must have finite stops")]
    InvalidFillDomain {
        /// First stop.
        min: f64,
        /// Middle stop.
        mid: Option<f64>,
        /// Last stop.
        max: f64,
    },
    /// A log scale was configured over a domain that touches or crosses zero.
    #[error("log scale for the {channel} channel needs a strictly positive domain")]
    NonPositiveLogDomain {
        /// The channel using the log scale.
        channel: Channel,
    },
    /// A tick format specifier could not be parsed.
    #[error("invalid tick format {spec:?}")]
    InvalidFormat {
        /// The rejected specifier.
        spec: String,
    },
}

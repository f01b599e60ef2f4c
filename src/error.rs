// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for every fallible step between a user's request and a
//! finished grid.

use failure::Fail;

/// Which axis of the complex plane a bounds error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The real axis.
    Real,
    /// The imaginary axis.
    Imaginary,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Axis::Real => write!(f, "real"),
            Axis::Imaginary => write!(f, "imaginary"),
        }
    }
}

/// A viewport that violates its invariants.
#[derive(Debug, Fail, PartialEq)]
pub enum ViewportError {
    /// A bound, the center, or the zoom is NaN or infinite.
    #[fail(display = "viewport coordinates must be finite")]
    NonFinite,
    /// Width or height is zero.
    #[fail(display = "resolution must be at least 1x1, got {}x{}", width, height)]
    EmptyResolution {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },
    /// The lower bound is not strictly below the upper bound.
    #[fail(display = "{} axis bounds are inverted or empty: {} >= {}", axis, min, max)]
    InvertedBounds {
        /// The offending axis.
        axis: Axis,
        /// The lower bound given.
        min: f64,
        /// The upper bound given.
        max: f64,
    },
    /// The iteration budget is zero.
    #[fail(display = "max_iter must be at least 1")]
    ZeroIterations,
    /// Zoom must be strictly positive.
    #[fail(display = "zoom must be positive, got {}", _0)]
    NonPositiveZoom(f64),
}

/// A viewport that is well formed but larger than the configured limits.
#[derive(Debug, Fail, PartialEq)]
pub enum LimitError {
    /// One side of the grid exceeds the dimension limit.
    #[fail(display = "resolution {}x{} exceeds the {} pixel limit", width, height, limit)]
    DimensionTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
        /// The per-side limit.
        limit: usize,
    },
    /// The iteration budget exceeds the limit.
    #[fail(display = "{} iterations exceeds the limit of {}", requested, limit)]
    TooManyIterations {
        /// Requested iterations.
        requested: u32,
        /// The limit.
        limit: u32,
    },
    /// `width * height * max_iter` exceeds the work limit.
    #[fail(display = "render would need {} iterations, limit is {}", work, limit)]
    TooMuchWork {
        /// The requested product.
        work: u64,
        /// The limit.
        limit: u64,
    },
}

/// A failure while the engine was running.
#[derive(Debug, Fail)]
pub enum EngineError {
    /// A worker thread panicked before finishing its rows.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// A palette name that is not in the fixed set.
#[derive(Debug, Fail, PartialEq)]
pub enum PaletteError {
    /// The name did not match any palette.
    #[fail(display = "unknown palette '{}', expected one of: {}", name, expected)]
    Unknown {
        /// The name the caller gave.
        name: String,
        /// Comma-separated list of valid names.
        expected: String,
    },
}

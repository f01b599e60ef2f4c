#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never runs off to infinity.  Once `|z|` passes 2 it is
//! guaranteed to, so the number of steps it takes to get there is a
//! measure of how quickly a point leaves.  That count, taken for
//! every pixel of a viewport, is the escape-time field this crate
//! computes; a palette then turns the counts into colors.
//!
//! The computation is a pure function of the viewport.  Where the
//! user is looking, and how much work they are allowed to ask for,
//! are the caller's business: see `ViewportState` and `Limits`.

pub mod engine;
pub mod error;
pub mod grid;
pub mod limits;
pub mod palette;
pub mod viewport;

pub use engine::{escape_time, EscapeTimeEngine};
pub use error::{EngineError, LimitError, PaletteError, ViewportError};
pub use grid::{Grid, GridStats, IterationCount};
pub use limits::Limits;
pub use palette::Palette;
pub use viewport::{linspace, Viewport, ViewportState};

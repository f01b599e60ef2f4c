// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time renderer
//!
//! For every sample `c` of a viewport, iterate `z <- z*z + c` from
//! zero and record the iteration at which `|z|` first leaves the
//! circle of radius 2.  Samples that have not left it by the end of
//! the budget are reported as `max_iter`.
//!
//! One quirk is kept on purpose: the recorded value is the loop index
//! of the escaping step, so a sample that escapes on the very first
//! step records 0, and every recorded 0 is then replaced by
//! `max_iter`.  Such samples (those with `|c| > 2`) are therefore
//! colored like the interior.  Changing this shifts the gradient near
//! the boundary.

use num::Complex;
use std::sync::Mutex;

use crate::error::EngineError;
use crate::grid::{Grid, IterationCount};
use crate::viewport::Viewport;

/// A sample stays bounded while `|z| <= ESCAPE_RADIUS`.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Iterate a single sample and return its escape time, with the
/// never-escaped (and escaped-on-step-zero) case reported as
/// `max_iter`.
pub fn escape_time(c: Complex<f64>, max_iter: u32) -> IterationCount {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut div_time: IterationCount = 0;
    for iteration in 0..max_iter {
        z = z * z + c;
        // Written as a negated `<=` so that a NaN counts as escaped.
        if !(z.norm() <= ESCAPE_RADIUS) {
            div_time += iteration;
            break;
        }
    }
    if div_time == 0 {
        max_iter
    } else {
        div_time
    }
}

fn render_row(xs: &[f64], y: f64, max_iter: u32, row: &mut [IterationCount]) {
    for (cell, &x) in row.iter_mut().zip(xs) {
        *cell = escape_time(Complex::new(x, y), max_iter);
    }
}

/// Turns viewports into grids.  Holds no state between calls beyond
/// how many threads to spread a render over; every call allocates
/// and fills a fresh grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EscapeTimeEngine {
    threads: usize,
}

impl Default for EscapeTimeEngine {
    fn default() -> Self {
        EscapeTimeEngine::new()
    }
}

impl EscapeTimeEngine {
    /// A single-threaded engine.
    pub fn new() -> Self {
        EscapeTimeEngine { threads: 1 }
    }

    /// An engine that hands rows out to `threads` workers.  A count of
    /// zero is treated as one.
    pub fn with_threads(threads: usize) -> Self {
        EscapeTimeEngine {
            threads: threads.max(1),
        }
    }

    /// The number of workers this engine uses.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Compute the escape-time grid for `viewport`.  The output does
    /// not depend on the thread count.
    pub fn compute(&self, viewport: &Viewport) -> Result<Grid, EngineError> {
        log::debug!(
            "rendering {}x{} over [{}, {}] x [{}, {}], {} iterations, {} thread(s)",
            viewport.width(),
            viewport.height(),
            viewport.x_min(),
            viewport.x_max(),
            viewport.y_min(),
            viewport.y_max(),
            viewport.max_iter(),
            self.threads
        );
        if self.threads == 1 || viewport.height() == 1 {
            Ok(self.compute_single(viewport))
        } else {
            self.compute_threaded(viewport)
        }
    }

    fn compute_single(&self, viewport: &Viewport) -> Grid {
        let xs = viewport.x_axis();
        let max_iter = viewport.max_iter();
        let mut cells = vec![0 as IterationCount; viewport.len()];
        for (row, &y) in cells.chunks_mut(viewport.width()).zip(&viewport.y_axis()) {
            render_row(&xs, y, max_iter, row);
        }
        Grid::from_cells(viewport.width(), viewport.height(), max_iter, cells)
    }

    /// Each worker pulls the next unfinished row out of a shared queue
    /// and fills it in place.  Rows do not depend on one another, so
    /// the order they finish in does not matter.
    fn compute_threaded(&self, viewport: &Viewport) -> Result<Grid, EngineError> {
        let xs = viewport.x_axis();
        let ys = viewport.y_axis();
        let max_iter = viewport.max_iter();
        let mut cells = vec![0 as IterationCount; viewport.len()];
        {
            let rows = Mutex::new(cells.chunks_mut(viewport.width()).zip(ys.iter()));
            let rows = &rows;
            let xs = &xs;
            crossbeam::scope(|spawner| {
                for worker in 0..self.threads {
                    spawner.spawn(move |_| {
                        let mut done = 0;
                        loop {
                            let next = match rows.lock() {
                                Ok(mut queue) => queue.next(),
                                Err(_) => None,
                            };
                            match next {
                                Some((row, &y)) => {
                                    render_row(xs, y, max_iter, row);
                                    done += 1;
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        log::trace!("worker {} rendered {} rows", worker, done);
                    });
                }
            })
            .map_err(|_| EngineError::WorkerPanicked)?;
        }
        Ok(Grid::from_cells(
            viewport.width(),
            viewport.height(),
            max_iter,
            cells,
        ))
    }
}

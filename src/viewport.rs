// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a grid of pixels with an origin at 0,0 and a rectangle on
//! the complex plane, plus the iteration budget used to sample it.
//! Unlike a pixel-block mapping, samples are taken at evenly spaced
//! positions with both endpoints included, so the first column sits
//! exactly on `x_min` and the last exactly on `x_max`.
use num::Complex;

use crate::error::{Axis, ViewportError};

/// Half the side of the visible square at zoom 1.
pub const HALF_EXTENT: f64 = 1.5;

/// `n` evenly spaced samples from `start` to `stop`, both included.
/// A single sample is `start`.  The final sample is pinned to `stop`
/// so that accumulated rounding never pushes it off the edge.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / ((n - 1) as f64);
            let mut samples: Vec<f64> = (0..n).map(|i| start + (i as f64) * step).collect();
            samples[n - 1] = stop;
            samples
        }
    }
}

/// A rectangular region of the complex plane, the pixel resolution
/// at which to sample it, and the iteration budget.  Once built it
/// cannot be changed; build a new one per render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
    max_iter: u32,
}

impl Viewport {
    /// Takes the bounds of the complex plane, the number of columns
    /// and rows to sample, and the iteration budget.  Fails if the
    /// bounds are not finite or inverted, or either count is zero.
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        width: usize,
        height: usize,
        max_iter: u32,
    ) -> Result<Viewport, ViewportError> {
        if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
            return Err(ViewportError::NonFinite);
        }
        if x_min >= x_max {
            return Err(ViewportError::InvertedBounds {
                axis: Axis::Real,
                min: x_min,
                max: x_max,
            });
        }
        if y_min >= y_max {
            return Err(ViewportError::InvertedBounds {
                axis: Axis::Imaginary,
                min: y_min,
                max: y_max,
            });
        }
        if width == 0 || height == 0 {
            return Err(ViewportError::EmptyResolution { width, height });
        }
        if max_iter == 0 {
            return Err(ViewportError::ZeroIterations);
        }
        Ok(Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
            width,
            height,
            max_iter,
        })
    }

    /// Builds the square viewport centered on `center` whose half
    /// side is `1.5 / zoom`.
    pub fn from_center(
        center: (f64, f64),
        zoom: f64,
        width: usize,
        height: usize,
        max_iter: u32,
    ) -> Result<Viewport, ViewportError> {
        if !zoom.is_finite() || !center.0.is_finite() || !center.1.is_finite() {
            return Err(ViewportError::NonFinite);
        }
        if zoom <= 0.0 {
            return Err(ViewportError::NonPositiveZoom(zoom));
        }
        let half_extent = HALF_EXTENT * (1.0 / zoom);
        Viewport::new(
            center.0 - half_extent,
            center.0 + half_extent,
            center.1 - half_extent,
            center.1 + half_extent,
            width,
            height,
            max_iter,
        )
    }

    /// Left edge of the real axis.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Right edge of the real axis.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Bottom edge of the imaginary axis.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Top edge of the imaginary axis.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration budget.
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// The total number of points in the grid.  Used to calculate
    /// memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a constructed viewport; present for symmetry
    /// with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The real coordinate of every column, for axis labels.
    pub fn x_axis(&self) -> Vec<f64> {
        linspace(self.x_min, self.x_max, self.width)
    }

    /// The imaginary coordinate of every row, for axis labels.
    pub fn y_axis(&self) -> Vec<f64> {
        linspace(self.y_min, self.y_max, self.height)
    }

    /// Every sample point, row-major: `c[row][col] = x[col] + i*y[row]`.
    pub fn samples(&self) -> Vec<Complex<f64>> {
        let xs = self.x_axis();
        self.y_axis()
            .into_iter()
            .flat_map(|y| xs.iter().map(move |&x| Complex::new(x, y)))
            .collect()
    }

    /// The (row, column) of the sample closest to the point `(x, y)`.
    /// Points outside the viewport snap to the nearest edge.
    pub fn nearest_pixel(&self, x: f64, y: f64) -> (usize, usize) {
        (
            nearest_index(self.y_min, self.y_max, self.height, y),
            nearest_index(self.x_min, self.x_max, self.width, x),
        )
    }
}

fn nearest_index(start: f64, stop: f64, n: usize, value: f64) -> usize {
    if n <= 1 {
        return 0;
    }
    let step = (stop - start) / ((n - 1) as f64);
    let index = ((value - start) / step).round();
    if index <= 0.0 {
        0
    } else if index >= (n - 1) as f64 {
        n - 1
    } else {
        index as usize
    }
}

/// The part of a render request the interface layer remembers
/// between renders: where the user is looking, and how closely.
/// The engine never holds on to one; pass it in by value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportState {
    /// The point in the center of the view.
    pub center: (f64, f64),
    /// Magnification; 1.0 shows a 3x3 square.
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        ViewportState {
            center: (-0.5, 0.0),
            zoom: 1.0,
        }
    }
}

impl ViewportState {
    /// Build the viewport for this state at the given resolution.
    pub fn viewport(
        &self,
        width: usize,
        height: usize,
        max_iter: u32,
    ) -> Result<Viewport, ViewportError> {
        Viewport::from_center(self.center, self.zoom, width, height, max_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let xs = linspace(-2.0, 1.0, 7);
        assert_eq!(xs.len(), 7);
        assert_eq!(xs[0], -2.0);
        assert_eq!(xs[6], 1.0);
        assert_eq!(xs[2], -1.0);
    }

    #[test]
    fn linspace_single_sample_is_start() {
        assert_eq!(linspace(0.25, 3.0, 1), vec![0.25]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn viewport_fails_on_inverted_bounds() {
        let vp = Viewport::new(1.0, -1.0, -1.0, 1.0, 4, 4, 10);
        assert_eq!(
            vp,
            Err(ViewportError::InvertedBounds {
                axis: Axis::Real,
                min: 1.0,
                max: -1.0
            })
        );
        let vp = Viewport::new(-1.0, 1.0, 0.5, 0.5, 4, 4, 10);
        assert!(match vp {
            Err(ViewportError::InvertedBounds { axis, .. }) => axis == Axis::Imaginary,
            _ => false,
        });
    }

    #[test]
    fn viewport_fails_on_degenerate_inputs() {
        assert_eq!(
            Viewport::new(-1.0, 1.0, -1.0, 1.0, 0, 4, 10),
            Err(ViewportError::EmptyResolution { width: 0, height: 4 })
        );
        assert_eq!(
            Viewport::new(-1.0, 1.0, -1.0, 1.0, 4, 4, 0),
            Err(ViewportError::ZeroIterations)
        );
        assert_eq!(
            Viewport::new(std::f64::NAN, 1.0, -1.0, 1.0, 4, 4, 10),
            Err(ViewportError::NonFinite)
        );
    }

    #[test]
    fn from_center_matches_zoom_extent() {
        let vp = Viewport::from_center((-0.5, 0.0), 1.0, 600, 600, 100).unwrap();
        assert_eq!(vp.x_min(), -2.0);
        assert_eq!(vp.x_max(), 1.0);
        assert_eq!(vp.y_min(), -1.5);
        assert_eq!(vp.y_max(), 1.5);

        let vp = Viewport::from_center((0.0, 0.0), 4.0, 10, 10, 100).unwrap();
        assert_eq!(vp.x_min(), -0.375);
        assert_eq!(vp.y_max(), 0.375);
    }

    #[test]
    fn from_center_rejects_bad_zoom() {
        assert_eq!(
            Viewport::from_center((0.0, 0.0), 0.0, 10, 10, 100),
            Err(ViewportError::NonPositiveZoom(0.0))
        );
        assert_eq!(
            Viewport::from_center((0.0, 0.0), -2.0, 10, 10, 100),
            Err(ViewportError::NonPositiveZoom(-2.0))
        );
    }

    #[test]
    fn samples_are_row_major() {
        let vp = Viewport::new(0.0, 2.0, -1.0, 1.0, 3, 2, 10).unwrap();
        let samples = vp.samples();
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[0], Complex::new(0.0, -1.0));
        assert_eq!(samples[2], Complex::new(2.0, -1.0));
        assert_eq!(samples[3], Complex::new(0.0, 1.0));
        assert_eq!(samples[4], Complex::new(1.0, 1.0));
    }

    #[test]
    fn nearest_pixel_rounds_and_clamps() {
        let vp = Viewport::new(-2.0, 2.0, -2.0, 2.0, 5, 5, 10).unwrap();
        assert_eq!(vp.nearest_pixel(0.0, 0.0), (2, 2));
        assert_eq!(vp.nearest_pixel(-2.0, 2.0), (4, 0));
        assert_eq!(vp.nearest_pixel(0.6, -0.4), (2, 3));
        assert_eq!(vp.nearest_pixel(10.0, -10.0), (0, 4));
    }

    #[test]
    fn default_state_shows_the_whole_set() {
        let vp = ViewportState::default().viewport(600, 600, 100).unwrap();
        assert_eq!((vp.x_min(), vp.x_max()), (-2.0, 1.0));
        assert_eq!(vp.len(), 360_000);
    }
}

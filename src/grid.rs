// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time field: one iteration count per sample, stored
//! row-major in a single contiguous buffer.

use itertools::{iproduct, Itertools, MinMaxResult};

/// The iteration count recorded for one sample.
pub type IterationCount = u32;

/// A `height x width` grid of iteration counts, each in
/// `1..=max_iter` when produced by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    max_iter: u32,
    cells: Vec<IterationCount>,
}

/// A summary of a grid, for logging and for scaling colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridStats {
    /// The smallest count in the grid.
    pub min: IterationCount,
    /// The largest count in the grid.
    pub max: IterationCount,
    /// How many cells reported the full iteration budget.
    pub interior: usize,
}

impl Grid {
    pub(crate) fn from_cells(
        width: usize,
        height: usize,
        max_iter: u32,
        cells: Vec<IterationCount>,
    ) -> Grid {
        assert!(cells.len() == width * height);
        Grid {
            width,
            height,
            max_iter,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration budget the grid was computed with.
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True only for a grid with no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The count at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<IterationCount> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// One row of the grid.
    pub fn row(&self, row: usize) -> &[IterationCount] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate over rows from the first (`y_min`) to the last.
    pub fn rows(&self) -> impl Iterator<Item = &[IterationCount]> {
        self.cells.chunks(self.width)
    }

    /// The whole buffer, row-major.
    pub fn as_slice(&self) -> &[IterationCount] {
        &self.cells
    }

    /// Swap rows and columns, so that rows follow the real axis.  Some
    /// heatmap renderers want their data in that orientation.
    pub fn transpose(&self) -> Grid {
        let cells = iproduct!(0..self.width, 0..self.height)
            .map(|(col, row)| self.cells[row * self.width + col])
            .collect();
        Grid::from_cells(self.height, self.width, self.max_iter, cells)
    }

    /// The range of counts and the number of cells that never escaped.
    pub fn stats(&self) -> GridStats {
        let (min, max) = match self.cells.iter().minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(&v) => (v, v),
            MinMaxResult::MinMax(&lo, &hi) => (lo, hi),
        };
        let interior = self.cells.iter().filter(|&&v| v == self.max_iter).count();
        GridStats { min, max, interior }
    }

    /// The fraction of cells that never escaped.
    pub fn interior_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        (self.stats().interior as f64) / (self.cells.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_cells(3, 2, 9, vec![1, 2, 3, 4, 9, 9])
    }

    #[test]
    fn get_is_row_major() {
        let g = sample();
        assert_eq!(g.get(0, 0), Some(1));
        assert_eq!(g.get(0, 2), Some(3));
        assert_eq!(g.get(1, 0), Some(4));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 3), None);
        assert_eq!(g.row(1), &[4, 9, 9]);
        assert_eq!(g.rows().count(), 2);
    }

    #[test]
    fn transpose_swaps_axes() {
        let t = sample().transpose();
        assert_eq!((t.width(), t.height()), (2, 3));
        assert_eq!(t.as_slice(), &[1, 4, 2, 9, 3, 9]);
        assert_eq!(t.transpose(), sample());
    }

    #[test]
    fn stats_count_interior_cells() {
        let g = sample();
        assert_eq!(
            g.stats(),
            GridStats {
                min: 1,
                max: 9,
                interior: 2
            }
        );
        assert!((g.interior_fraction() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic]
    fn from_cells_checks_length() {
        Grid::from_cells(2, 2, 5, vec![1, 2, 3]);
    }
}

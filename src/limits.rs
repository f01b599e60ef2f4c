// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bounds on how much work a single request may ask for.  The engine
//! itself will happily run any viewport it is handed; callers that
//! take requests from users put a `Limits` in front of it.

use num::clamp;

use crate::error::LimitError;
use crate::viewport::Viewport;

/// Default per-side resolution limit.
pub const MAX_DIMENSION: usize = 4096;
/// Default iteration limit.
pub const MAX_ITERATIONS: u32 = 200_000;
/// Default limit on `width * height * max_iter`.
pub const MAX_WORK: u64 = 2_000_000_000;

/// Upper bounds for a render request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Largest allowed width or height.
    pub max_dimension: usize,
    /// Largest allowed iteration budget.
    pub max_iterations: u32,
    /// Largest allowed worst-case iteration total.
    pub max_work: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_dimension: MAX_DIMENSION,
            max_iterations: MAX_ITERATIONS,
            max_work: MAX_WORK,
        }
    }
}

fn work(width: usize, height: usize, max_iter: u32) -> u64 {
    (width as u64)
        .saturating_mul(height as u64)
        .saturating_mul(u64::from(max_iter))
}

impl Limits {
    /// Reject a viewport that exceeds any of the limits.
    pub fn check(&self, viewport: &Viewport) -> Result<(), LimitError> {
        let (width, height) = (viewport.width(), viewport.height());
        if width > self.max_dimension || height > self.max_dimension {
            return Err(LimitError::DimensionTooLarge {
                width,
                height,
                limit: self.max_dimension,
            });
        }
        if viewport.max_iter() > self.max_iterations {
            return Err(LimitError::TooManyIterations {
                requested: viewport.max_iter(),
                limit: self.max_iterations,
            });
        }
        let requested = work(width, height, viewport.max_iter());
        if requested > self.max_work {
            return Err(LimitError::TooMuchWork {
                work: requested,
                limit: self.max_work,
            });
        }
        Ok(())
    }

    /// Pull a request into range: each count between 1 and its limit,
    /// then the iteration budget lowered until the total work fits.
    /// The resolution is never reduced to make the work fit.
    pub fn clamp(&self, width: usize, height: usize, max_iter: u32) -> (usize, usize, u32) {
        let width = clamp(width, 1, self.max_dimension.max(1));
        let height = clamp(height, 1, self.max_dimension.max(1));
        let mut max_iter = clamp(max_iter, 1, self.max_iterations.max(1));
        let pixels = (width as u64) * (height as u64);
        if work(width, height, max_iter) > self.max_work {
            let fits = (self.max_work / pixels).max(1);
            max_iter = fits.min(u64::from(max_iter)) as u32;
        }
        (width, height, max_iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: usize, height: usize, max_iter: u32) -> Viewport {
        Viewport::new(-2.0, 1.0, -1.5, 1.5, width, height, max_iter).unwrap()
    }

    #[test]
    fn default_limits_accept_the_standard_view() {
        assert_eq!(Limits::default().check(&viewport(600, 600, 100)), Ok(()));
    }

    #[test]
    fn check_rejects_each_limit() {
        let limits = Limits {
            max_dimension: 100,
            max_iterations: 50,
            max_work: 10_000,
        };
        assert_eq!(
            limits.check(&viewport(101, 10, 5)),
            Err(LimitError::DimensionTooLarge {
                width: 101,
                height: 10,
                limit: 100
            })
        );
        assert_eq!(
            limits.check(&viewport(10, 10, 51)),
            Err(LimitError::TooManyIterations {
                requested: 51,
                limit: 50
            })
        );
        assert_eq!(
            limits.check(&viewport(50, 50, 5)),
            Err(LimitError::TooMuchWork {
                work: 12_500,
                limit: 10_000
            })
        );
    }

    #[test]
    fn clamp_raises_zeros_and_caps_sizes() {
        let limits = Limits::default();
        assert_eq!(limits.clamp(0, 0, 0), (1, 1, 1));
        assert_eq!(limits.clamp(10_000, 1, 300_000), (4096, 1, 200_000));
        assert_eq!(limits.clamp(10_000, 20, 300_000), (4096, 20, 24_414));
    }

    #[test]
    fn clamp_trades_iterations_for_work() {
        let limits = Limits {
            max_dimension: 1000,
            max_iterations: 1000,
            max_work: 1_000_000,
        };
        let (w, h, i) = limits.clamp(1000, 1000, 1000);
        assert_eq!((w, h, i), (1000, 1000, 1));
        let (w, h, i) = limits.clamp(100, 100, 1000);
        assert_eq!((w, h, i), (100, 100, 100));
        assert_eq!(limits.check(&viewport(w, h, i)), Ok(()));
    }
}

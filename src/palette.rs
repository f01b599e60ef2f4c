// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Named color scales and a colorizer that turns a grid into an
//! in-memory RGB image.  Colors are purely cosmetic; nothing here
//! feeds back into the escape-time computation.

use image::{ImageBuffer, Rgb, RgbImage};
use std::fmt;
use std::str::FromStr;

use crate::error::PaletteError;
use crate::grid::Grid;

/// The fixed set of color scales a caller may choose from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Perceptually uniform, dark blue through green to yellow.
    Viridis,
    /// Blue to yellow, readable with color-vision deficiency.
    Cividis,
    /// Black through red to pale yellow.
    Inferno,
    /// Black through purple to pale pink.
    Magma,
    /// Deep blue through magenta to yellow.
    Plasma,
    /// A smooth rainbow, dark blue to dark red.
    Turbo,
    /// Black through purple and orange to white.
    Electric,
    /// Purple through blue, green and yellow to red.
    Rainbow,
    /// Black to white.
    Greys,
    /// Deep blue to light grey.
    Blues,
}

const ALL: [Palette; 10] = [
    Palette::Viridis,
    Palette::Cividis,
    Palette::Inferno,
    Palette::Magma,
    Palette::Plasma,
    Palette::Turbo,
    Palette::Electric,
    Palette::Rainbow,
    Palette::Greys,
    Palette::Blues,
];

const VIRIDIS: &[[u8; 3]] = &[
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

const CIVIDIS: &[[u8; 3]] = &[
    [0x00, 0x22, 0x4e],
    [0x12, 0x35, 0x70],
    [0x3b, 0x49, 0x6c],
    [0x57, 0x5d, 0x6d],
    [0x70, 0x71, 0x73],
    [0x8a, 0x86, 0x78],
    [0xa5, 0x9c, 0x74],
    [0xc3, 0xb3, 0x69],
    [0xe1, 0xcc, 0x55],
    [0xfe, 0xe8, 0x38],
];

const INFERNO: &[[u8; 3]] = &[
    [0x00, 0x00, 0x04],
    [0x1b, 0x0c, 0x41],
    [0x4a, 0x0c, 0x6b],
    [0x78, 0x1c, 0x6d],
    [0xa5, 0x2c, 0x60],
    [0xcf, 0x44, 0x46],
    [0xed, 0x69, 0x25],
    [0xfb, 0x9b, 0x06],
    [0xf7, 0xd1, 0x3d],
    [0xfc, 0xff, 0xa4],
];

const MAGMA: &[[u8; 3]] = &[
    [0x00, 0x00, 0x04],
    [0x18, 0x0f, 0x3d],
    [0x44, 0x0f, 0x76],
    [0x72, 0x1f, 0x81],
    [0x9e, 0x2f, 0x7f],
    [0xcd, 0x40, 0x71],
    [0xf1, 0x60, 0x5d],
    [0xfd, 0x96, 0x68],
    [0xfe, 0xca, 0x8d],
    [0xfc, 0xfd, 0xbf],
];

const PLASMA: &[[u8; 3]] = &[
    [0x0d, 0x08, 0x87],
    [0x46, 0x03, 0x9f],
    [0x72, 0x01, 0xa8],
    [0x9c, 0x17, 0x9e],
    [0xbd, 0x37, 0x86],
    [0xd8, 0x57, 0x6b],
    [0xed, 0x79, 0x53],
    [0xfb, 0x9f, 0x3a],
    [0xfd, 0xca, 0x26],
    [0xf0, 0xf9, 0x21],
];

const TURBO: &[[u8; 3]] = &[
    [0x30, 0x12, 0x3b],
    [0x41, 0x45, 0xab],
    [0x46, 0x75, 0xed],
    [0x39, 0xa2, 0xfc],
    [0x1b, 0xcf, 0xd4],
    [0x24, 0xec, 0xa6],
    [0x61, 0xfc, 0x6c],
    [0xa4, 0xfc, 0x3b],
    [0xd1, 0xe8, 0x34],
    [0xf3, 0xc6, 0x3a],
    [0xfe, 0x9b, 0x2d],
    [0xf3, 0x63, 0x15],
    [0xd9, 0x38, 0x06],
    [0xb1, 0x19, 0x01],
    [0x7a, 0x04, 0x02],
];

const ELECTRIC: &[[u8; 3]] = &[
    [0, 0, 0],
    [30, 0, 100],
    [120, 0, 100],
    [160, 90, 0],
    [230, 200, 0],
    [255, 250, 220],
];

const RAINBOW: &[[u8; 3]] = &[
    [150, 0, 90],
    [0, 0, 200],
    [0, 25, 255],
    [0, 152, 255],
    [44, 255, 150],
    [151, 255, 0],
    [255, 234, 0],
    [255, 111, 0],
    [255, 0, 0],
];

const GREYS: &[[u8; 3]] = &[[0, 0, 0], [255, 255, 255]];

const BLUES: &[[u8; 3]] = &[
    [5, 10, 172],
    [40, 60, 190],
    [70, 100, 245],
    [90, 120, 245],
    [106, 137, 247],
    [220, 220, 220],
];

impl Palette {
    /// Every palette, in menu order.
    pub fn all() -> &'static [Palette] {
        &ALL
    }

    /// The display name, as accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            Palette::Viridis => "Viridis",
            Palette::Cividis => "Cividis",
            Palette::Inferno => "Inferno",
            Palette::Magma => "Magma",
            Palette::Plasma => "Plasma",
            Palette::Turbo => "Turbo",
            Palette::Electric => "Electric",
            Palette::Rainbow => "Rainbow",
            Palette::Greys => "Greys",
            Palette::Blues => "Blues",
        }
    }

    fn stops(self) -> &'static [[u8; 3]] {
        match self {
            Palette::Viridis => VIRIDIS,
            Palette::Cividis => CIVIDIS,
            Palette::Inferno => INFERNO,
            Palette::Magma => MAGMA,
            Palette::Plasma => PLASMA,
            Palette::Turbo => TURBO,
            Palette::Electric => ELECTRIC,
            Palette::Rainbow => RAINBOW,
            Palette::Greys => GREYS,
            Palette::Blues => BLUES,
        }
    }

    /// The color at position `t` along the scale.  `t` is clamped to
    /// `[0, 1]`; NaN reads as 0.
    pub fn color(self, t: f64) -> Rgb<u8> {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
        let scaled = t * ((stops.len() - 1) as f64);
        let idx = (scaled as usize).min(stops.len() - 2);
        let frac = scaled - (idx as f64);
        let (lo, hi) = (stops[idx], stops[idx + 1]);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
        Rgb([mix(lo[0], hi[0]), mix(lo[1], hi[1]), mix(lo[2], hi[2])])
    }

    /// The color for each count of `grid`, scaled over the grid's own
    /// range of counts.  The top image row shows the largest imaginary
    /// value, so the picture is the right way up.
    pub fn colorize(self, grid: &Grid) -> RgbImage {
        let stats = grid.stats();
        let span = f64::from(stats.max - stats.min);
        let height = grid.height();
        ImageBuffer::from_fn(grid.width() as u32, height as u32, |x, y| {
            let row = height - 1 - (y as usize);
            let value = grid.row(row)[x as usize];
            let t = if span > 0.0 {
                f64::from(value - stats.min) / span
            } else {
                0.0
            };
            self.color(t)
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Viridis
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Palette {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter()
            .cloned()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaletteError::Unknown {
                name: s.to_string(),
                expected: ALL.iter().map(|p| p.name()).collect::<Vec<_>>().join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EscapeTimeEngine;
    use crate::viewport::Viewport;

    #[test]
    fn names_round_trip_ignoring_case() {
        for p in Palette::all() {
            assert_eq!(p.name().parse::<Palette>(), Ok(*p));
        }
        assert_eq!("  inferno ".parse::<Palette>(), Ok(Palette::Inferno));
        assert_eq!("GREYS".parse::<Palette>(), Ok(Palette::Greys));
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "jet".parse::<Palette>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("jet"));
        assert!(msg.contains("Viridis, Cividis"));
        assert!(msg.ends_with("Blues"));
    }

    #[test]
    fn color_hits_the_end_stops() {
        assert_eq!(Palette::Greys.color(0.0), Rgb([0, 0, 0]));
        assert_eq!(Palette::Greys.color(1.0), Rgb([255, 255, 255]));
        assert_eq!(Palette::Greys.color(0.5), Rgb([128, 128, 128]));
        assert_eq!(Palette::Viridis.color(1.0), Rgb([0xfd, 0xe7, 0x25]));
        assert_eq!(Palette::Viridis.color(-3.0), Palette::Viridis.color(0.0));
        assert_eq!(Palette::Viridis.color(7.0), Palette::Viridis.color(1.0));
        assert_eq!(Palette::Magma.color(std::f64::NAN), Rgb([0, 0, 4]));
    }

    #[test]
    fn colorize_matches_grid_shape_and_orientation() {
        // Bottom row (y = -1): c = -i is periodic, c = 1 - i escapes at
        // step 1.  Top row (y = 5) escapes at step 0 and reads as max.
        let vp = Viewport::new(0.0, 1.0, -1.0, 5.0, 2, 2, 10).unwrap();
        let grid = EscapeTimeEngine::new().compute(&vp).unwrap();
        assert_eq!(grid.as_slice(), &[10, 1, 10, 10]);

        let img = Palette::Greys.colorize(&grid);
        assert_eq!(img.dimensions(), (2, 2));
        let white = Rgb([255, 255, 255]);
        assert_eq!(*img.get_pixel(0, 0), white);
        assert_eq!(*img.get_pixel(1, 0), white);
        assert_eq!(*img.get_pixel(0, 1), white);
        assert_eq!(*img.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn flat_grid_uses_the_first_stop() {
        let vp = Viewport::new(-0.1, 0.1, -0.1, 0.1, 3, 3, 20).unwrap();
        let grid = EscapeTimeEngine::new().compute(&vp).unwrap();
        let img = Palette::Plasma.colorize(&grid);
        assert!(img.pixels().all(|p| *p == Palette::Plasma.color(0.0)));
    }
}

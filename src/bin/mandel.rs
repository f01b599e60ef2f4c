use clap::{App, Arg, ArgMatches};
use escapetime::limits::MAX_ITERATIONS;
use escapetime::{EscapeTimeEngine, Grid, Limits, Palette, Viewport, ViewportState};
use image::RgbImage;
use log::{info, warn};
use std::fmt::Write;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_zoom(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(z) if z.is_finite() && z > 0.0 => Ok(()),
        Ok(_) => Err("Zoom must be a positive number".to_string()),
        Err(_) => Err("Could not parse zoom".to_string()),
    }
}

const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ITERATIONS: &str = "iterations";
const SIZE: &str = "size";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const COLUMNS: &str = "columns";
const STATS: &str = "stats";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.5,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the view on the complex plane, as re,im"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| validate_zoom(&s))
                .help("Magnification; 1 shows a 3x3 square"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_ITERATIONS,
                        "Could not parse iteration count",
                        &format!("Iteration count must be between 1 and {}", MAX_ITERATIONS),
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("600x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse grid size"))
                .help("Size of the sampled grid, as WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("Viridis")
                .validator(|s| Palette::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Color scale for the preview"),
        )
        .arg(
            Arg::with_name(COLUMNS)
                .long(COLUMNS)
                .takes_value(true)
                .default_value("80")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse column count",
                        "Column count must be between 1 and 1000",
                    )
                })
                .help("Width of the terminal preview in characters"),
        )
        .arg(
            Arg::with_name(STATS)
                .long(STATS)
                .help("Print a summary of the grid instead of a preview"),
        )
        .get_matches()
}

/// Render `image` as terminal text, using an upper half block per
/// character so that each line of text carries two rows of pixels.
fn preview(image: &RgbImage, columns: u32) -> String {
    let (width, height) = image.dimensions();
    let columns = columns.min(width).max(1);
    let mut rows = ((u64::from(columns) * u64::from(height) / u64::from(width)) as u32).max(1);
    rows += rows % 2;
    let sample = |col: u32, row: u32| {
        let x = (u64::from(col) * u64::from(width) / u64::from(columns)) as u32;
        let y = (u64::from(row) * u64::from(height) / u64::from(rows)) as u32;
        image.get_pixel(x.min(width - 1), y.min(height - 1))
    };
    let mut out = String::new();
    for line in (0..rows).step_by(2) {
        for col in 0..columns {
            let top = sample(col, line);
            let bottom = sample(col, line + 1);
            let _ = write!(
                out,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}",
                top.0[0], top.0[1], top.0[2], bottom.0[0], bottom.0[1], bottom.0[2]
            );
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

fn summary(viewport: &Viewport, grid: &Grid) -> String {
    let stats = grid.stats();
    format!(
        "viewport: [{}, {}] x [{}, {}]\nresolution: {}x{}\niterations: {}\nrange: {}..{}\ninterior: {:.1}%\n",
        viewport.x_min(),
        viewport.x_max(),
        viewport.y_min(),
        viewport.y_max(),
        grid.width(),
        grid.height(),
        grid.max_iter(),
        stats.min,
        stats.max,
        100.0 * grid.interior_fraction()
    )
}

fn main() {
    env_logger::init();
    let matches = args();
    let center = parse_pair::<f64>(matches.value_of(CENTER).unwrap(), ',')
        .expect("Error parsing center point");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let size = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing grid size");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");
    let palette =
        Palette::from_str(matches.value_of(PALETTE).unwrap()).expect("Could not parse palette.");
    let columns =
        u32::from_str(matches.value_of(COLUMNS).unwrap()).expect("Could not parse column count.");

    let limits = Limits::default();
    let (width, height, max_iter) = limits.clamp(size.0, size.1, iterations);
    if (width, height, max_iter) != (size.0, size.1, iterations) {
        warn!(
            "request {}x{} at {} iterations clamped to {}x{} at {}",
            size.0, size.1, iterations, width, height, max_iter
        );
    }

    let state = ViewportState { center, zoom };
    let viewport = match state.viewport(width, height, max_iter) {
        Ok(viewport) => viewport,
        Err(e) => {
            eprintln!("Invalid viewport: {}", e);
            std::process::exit(1);
        }
    };
    info!("{:?}, palette {}", viewport, palette);

    match EscapeTimeEngine::with_threads(threads).compute(&viewport) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(grid) => {
            if matches.is_present(STATS) {
                print!("{}", summary(&viewport, &grid));
            } else {
                print!("{}", preview(&palette.colorize(&grid), columns));
            }
        }
    }
}

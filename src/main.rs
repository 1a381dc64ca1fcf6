// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use log::{info, warn};
use mandelbrot::config::{DEFAULT_OUTPUT, RenderConfig};
use mandelbrot::{write_image, BandRenderer, RenderError, Viewport};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let l = T::from_str(&s[..index]).ok()?;
    let r = T::from_str(&s[index + 1..]).ok()?;
    Some((l, r))
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| err.to_string())
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    let i = T::from_str(s).map_err(|_| isnotanumber_err.to_string())?;
    if i >= low && i <= high {
        Ok(())
    } else {
        Err(isnotinrange_err.to_string())
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

// Upper bound on the worker count; the C tool sized its thread array
// at 32 * 32.
const MAX_THREADS: usize = 32 * 32;

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version("0.1.0")
        .about("Banded multi-threaded Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output file (.png or .ppm)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-0.85")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the mandelbrot space; its imaginary part is the top row"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,0.8375")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("8")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        MAX_THREADS,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", MAX_THREADS),
                    )
                })
                .help("Number of bands (and threads) to render with; 0 means one per CPU"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iteration limit for the escape test"),
        )
        .get_matches()
}

fn invalid(what: &str) -> RenderError {
    RenderError::InvalidConfig(format!("could not parse {}", what))
}

fn config_from(matches: &ArgMatches) -> Result<RenderConfig, RenderError> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<usize>(s, 'x'))
        .ok_or_else(|| invalid("image dimensions"))?;
    let leftlower = matches
        .value_of(LEFTLOWER)
        .and_then(parse_complex)
        .ok_or_else(|| invalid("left lower point"))?;
    let rightupper = matches
        .value_of(RIGHTUPPER)
        .and_then(parse_complex)
        .ok_or_else(|| invalid("right upper point"))?;
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .ok_or_else(|| invalid("thread count"))?;
    let limit = matches
        .value_of(ITERATIONS)
        .and_then(|s| usize::from_str(s).ok())
        .ok_or_else(|| invalid("iteration count"))?;
    let output = matches.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT);

    let threads = if threads == 0 { num_cpus::get() } else { threads };
    if threads > height {
        warn!("only {} rows; capping {} threads to {}", height, threads, height);
    }

    Ok(RenderConfig {
        width,
        height,
        limit,
        workers: threads.min(height).max(1),
        viewport: Viewport::from_corners(leftlower, rightupper)?,
        output: PathBuf::from(output),
    })
}

fn run(config: &RenderConfig) -> Result<(), RenderError> {
    let renderer = BandRenderer::new(config)?;
    let mut pixels = renderer.allocate()?;

    let start = Instant::now();
    renderer.render_into(&mut pixels)?;
    info!(
        "rendered {}x{} with {} threads in {:.3}s",
        config.width,
        config.height,
        config.workers,
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    write_image(&config.output, &pixels, config.width, config.height)?;
    info!(
        "wrote {} in {:.3}s",
        config.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let matches = args();
    if let Err(e) = config_from(&matches).and_then(|config| run(&config)) {
        eprintln!("Render failure: {}", e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_parse() {
        assert_eq!(parse_pair::<usize>("1920x1080", 'x'), Some((1920, 1080)));
        assert_eq!(parse_pair::<usize>("1920", 'x'), None);
        assert_eq!(parse_pair::<usize>("1920xtall", 'x'), None);
        assert_eq!(parse_complex("-2.0,-0.85"), Some(Complex::new(-2.0, -0.85)));
    }

    #[test]
    fn validators_report_their_messages() {
        assert_eq!(validate_pair::<f64>("1,2", ',', "bad"), Ok(()));
        assert_eq!(validate_pair::<f64>("1;2", ',', "bad"), Err("bad".to_string()));
        assert_eq!(validate_range("8", 0, 1024, "nan", "range"), Ok(()));
        assert_eq!(validate_range("2048", 0, 1024, "nan", "range"), Err("range".to_string()));
        assert_eq!(validate_range("eight", 0, 1024, "nan", "range"), Err("nan".to_string()));
    }
}

extern crate buddhabrot;
extern crate clap;
extern crate env_logger;

use buddhabrot::{Config, Error, Palette, Renderer};
use clap::{App, Arg, ArgMatches};
use std::io;
use std::path::Path;
use std::str::FromStr;

fn validate_range<T: FromStr + PartialOrd>(
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

fn validate_palette(s: &str) -> Result<(), String> {
    Palette::from_str(s).map(|_| ()).map_err(|e| {
        let names: Vec<&str> = Palette::ALL.iter().map(|p| p.name()).collect();
        format!("{} (choose one of {})", e, names.join(", "))
    })
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const MASK_ITERATIONS: &str = "mask-iterations";
const DILATIONS: &str = "dilations";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const POINTS: &str = "points";
const UNIFORM: &str = "uniform";
const RADIUS: &str = "radius";
const PALETTE: &str = "palette";
const SEED: &str = "seed";
const QUIET: &str = "quiet";

fn args<'a>() -> ArgMatches<'a> {
    App::new("buddha")
        .version("0.3.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Buddhabrot renderer with boundary-biased sampling")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("buddhabrot.ppm")
                .help("Output file (plain-text PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("4096")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        65_536,
                        "Could not parse image size",
                        "Image size must be between 1 and 65536",
                    )
                })
                .help("Width and height of the output image"),
        )
        .arg(
            Arg::with_name(MASK_ITERATIONS)
                .long(MASK_ITERATIONS)
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        1_000_000,
                        "Could not parse mask iteration count",
                        "Mask iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap for the boundary-finding mask"),
        )
        .arg(
            Arg::with_name(DILATIONS)
                .long(DILATIONS)
                .short("d")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        0usize,
                        1000,
                        "Could not parse dilation count",
                        "Dilation count must be between 0 and 1000",
                    )
                })
                .help("How far to widen the boundary band, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("20")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iteration cap for each sampled orbit"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("12")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        4096,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 4096",
                    )
                })
                .help("Number of sampling threads"),
        )
        .arg(
            Arg::with_name(POINTS)
                .long(POINTS)
                .short("n")
                .takes_value(true)
                .default_value("100000000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0u64,
                        u64::max_value(),
                        "Could not parse sample count",
                        "Sample count out of range",
                    )
                })
                .help("Samples drawn by each thread"),
        )
        .arg(
            Arg::with_name(UNIFORM)
                .long(UNIFORM)
                .short("u")
                .takes_value(true)
                .default_value("1.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0f64,
                        1.0,
                        "Could not parse sampling probability",
                        "Sampling probability must be between 0 and 1",
                    )
                })
                .help("Probability of sampling the whole plane instead of near the boundary"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        4.0,
                        "Could not parse point radius",
                        "Point radius must be positive and at most 4",
                    )
                })
                .help("Half-width of the square sampled around a boundary point [default: half a pixel]"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("mako")
                .validator(|s| validate_palette(&s))
                .help("Colour palette: viridis, inferno, plasma, magma, rocket or mako"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0u64,
                        u64::max_value(),
                        "Could not parse seed",
                        "Seed out of range",
                    )
                })
                .help("Seed every random stream, for reproducible output"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Do not draw the progress bar"),
        )
        .get_matches()
}

fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    matches
        .value_of(name)
        .and_then(|s| T::from_str(s).ok())
        .ok_or_else(|| Error::InvalidConfig(format!("could not read --{}", name)))
}

fn optional<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, Error> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(_) => value(matches, name).map(Some),
    }
}

fn config(matches: &ArgMatches) -> Result<Config, Error> {
    Ok(Config {
        size: value(matches, SIZE)?,
        mask_iterations: value(matches, MASK_ITERATIONS)?,
        dilations: value(matches, DILATIONS)?,
        iterations: value(matches, ITERATIONS)?,
        threads: value(matches, THREADS)?,
        points: value(matches, POINTS)?,
        p_uniform: value(matches, UNIFORM)?,
        point_radius: optional(matches, RADIUS)?,
        palette: value(matches, PALETTE)?,
        seed: optional(matches, SEED)?,
    })
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let config = config(matches)?;
    let output: String = value(matches, OUTPUT)?;
    let palette = config.palette;
    let renderer = Renderer::new(config)?;

    let histogram = if matches.is_present(QUIET) {
        renderer.render(&mut io::sink())?
    } else {
        renderer.render(&mut io::stderr())?
    };
    buddhabrot::write_image(Path::new(&output), &histogram, palette)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}

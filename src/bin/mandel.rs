extern crate clap;
extern crate image;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use num::Complex;
use std::fs::File;
use std::io::{self, Write};
use std::str::FromStr;

use mandelbrot::config::{resolve_inset, resolve_keyframes};
use mandelbrot::{Palette, RenderConfig, RenderSpec, Renderer, Viewport};

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

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
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

const WIDTH: &str = "width";
const CENTER: &str = "center";
const DIM: &str = "dim";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const SET: &str = "set";
const JULIA: &str = "julia";
const NORMALIZE: &str = "normalize";
const COLOR: &str = "color";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";
const FILE: &str = "FILE";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Generates a PPM image of the Mandelbrot set or certain related fractals")
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("640")
                .validator(|s| validate_number::<u32>(&s, "Could not parse image width"))
                .help("Image width in pixels"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .default_value("0/0")
                .validator(|s| validate_pair::<f64>(&s, '/', "Could not parse center coordinates"))
                .help("Center coordinates as X/Y"),
        )
        .arg(
            Arg::with_name(DIM)
                .required(false)
                .long(DIM)
                .short("d")
                .takes_value(true)
                .default_value("4/4")
                .validator(|s| validate_pair::<f64>(&s, '/', "Could not parse region dimensions"))
                .help("Region dimensions as W/H"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("128")
                .validator(|s| validate_number::<u32>(&s, "Could not parse iteration cap"))
                .help("Maximum number of iterations per pixel"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2")
                .validator(|s| validate_number::<f64>(&s, "Could not parse escape radius"))
                .help("Escape radius"),
        )
        .arg(
            Arg::with_name(SET)
                .required(false)
                .long(SET)
                .short("s")
                .takes_value(true)
                .default_value("0")
                .validator(|s| validate_number::<u32>(&s, "Could not parse fractal selector"))
                .help("Fractal to generate: 0 Mandelbrot, 1 Mandelbar, 2 Burning ship, 3+ Multibrot"),
        )
        .arg(
            Arg::with_name(JULIA)
                .required(false)
                .long(JULIA)
                .short("j")
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, '/', "Could not parse Julia parameter"))
                .help("Generate a Julia set for the chosen fractal, seeded with JR/JI"),
        )
        .arg(
            Arg::with_name(NORMALIZE)
                .required(false)
                .long(NORMALIZE)
                .short("n")
                .help("Use normalized iteration counts (smooth gradients, but slower)"),
        )
        .arg(
            Arg::with_name(COLOR)
                .required(false)
                .long(COLOR)
                .short("e")
                .takes_value(true)
                .default_value("000")
                .help("Color for unescaped points in the set, as RRGGBB or RGB hex"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("000/fff")
                .help("Keyframe colors for the palette, as slash-separated hex colors"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
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
            Arg::with_name(FILE)
                .required(false)
                .index(1)
                .help("Output file; with no FILE, or when FILE is -, write to standard output"),
        )
        .get_matches()
}

fn config_from_matches(matches: &ArgMatches) -> RenderConfig {
    let mut config = RenderConfig::default();
    config.width =
        u32::from_str(matches.value_of(WIDTH).unwrap()).expect("Could not parse image width.");
    config.center = parse_pair(matches.value_of(CENTER).unwrap(), '/')
        .expect("Could not parse center coordinates.");
    config.dim = parse_pair(matches.value_of(DIM).unwrap(), '/')
        .expect("Could not parse region dimensions.");
    config.imax = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration cap.");
    config.radius =
        f64::from_str(matches.value_of(RADIUS).unwrap()).expect("Could not parse escape radius.");
    config.set =
        u32::from_str(matches.value_of(SET).unwrap()).expect("Could not parse fractal selector.");
    config.julia = matches.value_of(JULIA).map(|s| {
        let (jr, ji) = parse_pair(s, '/').expect("Could not parse Julia parameter.");
        Complex::new(jr, ji)
    });
    config.smooth = matches.is_present(NORMALIZE);
    config.inset = resolve_inset(matches.value_of(COLOR).unwrap());
    config.keyframes = resolve_keyframes(matches.value_of(PALETTE).unwrap());
    config
}

fn write_image<W: Write>(out: W, pixels: &[u8], size: (u32, u32)) -> Result<(), io::Error> {
    let mut encoder =
        PNMEncoder::new(out).with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
    encoder.encode(pixels, size.0, size.1, ColorType::RGB(8))?;
    Ok(())
}

fn main() {
    let matches = args();
    let config = config_from_matches(&matches);
    if let Err(e) = config.validate() {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Could not parse thread count.");

    let viewport = Viewport::new(
        config.center.0,
        config.center.1,
        config.dim.0,
        config.dim.1,
        config.width,
    )
    .expect("viewport parameters were validated");
    let palette =
        Palette::build(&config.keyframes, config.inset).expect("keyframes were validated");
    let spec = RenderSpec {
        viewport,
        fractal: config.fractal(),
        julia: config.julia,
        imax: config.imax,
        radius: config.radius,
        mode: config.mode(),
    };
    let renderer = Renderer::new(&spec, &palette).expect("render parameters were validated");

    let mut size = (0, 0);
    let mut pixels: Vec<u8> = Vec::with_capacity(viewport.len() * 3);
    {
        let record_size = |pw, ph| size = (pw, ph);
        let record_pixel = |r, g, b| {
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        };
        if threads > 1 {
            renderer.render_threaded(threads, record_size, record_pixel);
        } else {
            renderer.render(record_size, record_pixel);
        }
    }

    let written = match matches.value_of(FILE) {
        Some(path) if path != "-" => File::create(path)
            .and_then(|file| write_image(file, &pixels, size))
            .map_err(|e| format!("{}: {}", path, e)),
        _ => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            write_image(handle, &pixels, size).map_err(|e| e.to_string())
        }
    };
    if let Err(e) = written {
        eprintln!("mandel: {}", e);
        std::process::exit(1);
    }
}

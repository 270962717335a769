//! OSG: Convert between geographical coordinates and national grid
//! coordinates of Great Britain and Northern Ireland, or solve the inverse
//! geodesic problem for pairs of points.
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{debug, error, trace};
use osgrid::prelude::*;
use std::io::BufRead;
use std::path::PathBuf;

/// OSG: Grid coordinates to longitude/latitude (or the inverse, with --inv)
/// for the national grids of Great Britain (OSGB) and Northern Ireland (OSNI).
///
/// Input is read line by line from the files given, or from stdin.
/// Grid coordinates may be prefixed by grid square letters, as in
/// "TG 51409.903 13177.271". Angles are in degrees.
#[derive(Parser, Debug)]
#[clap(name = "osg")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The national grid to use
    #[clap(short, long, value_enum, default_value_t = Grid::Osgb)]
    grid: Grid,

    /// Inverse operation: longitude/latitude to grid coordinates
    #[clap(long = "inv")]
    inverse: bool,

    /// Solve the inverse geodesic problem: "lon1 lat1 lon2 lat2" to
    /// distance and azimuths
    #[clap(long)]
    geodesic: bool,

    /// The ellipsoid used with --geodesic
    #[clap(long, default_value = "GRS80")]
    ellps: String,

    /// Number of decimals in the output
    #[clap(short = 'd', long)]
    decimals: Option<usize>,

    /// Convergence tolerance (in metres) for grid to longitude/latitude
    #[clap(long)]
    tolerance: Option<f64>,

    /// Report fwd-inv roundtrip deviation
    #[clap(short, long)]
    roundtrip: bool,

    /// Echo input to output
    #[clap(short, long)]
    echo: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// The files to operate on
    args: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Grid {
    Osgb,
    Osni,
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("This is OSG");
    debug!("{options:#?}");

    if options.geodesic {
        let ellps = Ellipsoid::named(&options.ellps)?;
        return process(&options, |args| geodesic(&ellps, &options, args));
    }

    match options.grid {
        Grid::Osgb => {
            let mut osgb = Osgb::new();
            if let Some(tolerance) = options.tolerance {
                osgb.set_tolerance(tolerance);
            }
            process(&options, |args| convert(&osgb, &options, args))
        }
        Grid::Osni => {
            let mut osni = Osni::new();
            if let Some(tolerance) = options.tolerance {
                osni.set_tolerance(tolerance);
            }
            process(&options, |args| convert(&osni, &options, args))
        }
    }
}

// Feed each non-empty, non-comment line of the input to `handle`, and print
// the result. Lines that cannot be handled are reported, and skipped
fn process<F>(options: &Cli, mut handle: F) -> Result<(), anyhow::Error>
where
    F: FnMut(&[&str]) -> Result<String, anyhow::Error>,
{
    let mut sources = options.args.clone();
    if sources.is_empty() {
        sources.push("-".to_string());
    }

    for source in sources {
        let reader: Box<dyn BufRead> = if source == "-" {
            Box::new(std::io::stdin().lock())
        } else {
            let path = PathBuf::from(&source);
            let file = std::fs::File::open(&path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            Box::new(std::io::BufReader::new(file))
        };

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let args: Vec<&str> = line.split_whitespace().collect();
            if args.is_empty() || args[0].starts_with('#') {
                continue;
            }
            match handle(&args) {
                Ok(output) if options.echo => println!("{}  =>  {output}", line.trim()),
                Ok(output) => println!("{output}"),
                Err(e) => error!("{source}, line {}: {e:#}", index + 1),
            }
        }
    }
    Ok(())
}

fn numbers(args: &[&str]) -> Result<Vec<f64>, anyhow::Error> {
    args.iter()
        .map(|arg| {
            arg.parse::<f64>()
                .with_context(|| format!("malformed number '{arg}'"))
        })
        .collect()
}

// An optional leading group of one or two grid square letters. Tokens
// parsing as numbers, such as "nan" or "inf", are left in place
fn split_square_prefix<'a>(args: &'a [&'a str]) -> (&'a str, &'a [&'a str]) {
    match args.split_first() {
        Some((first, rest))
            if (1..=2).contains(&first.len())
                && first.chars().all(|c| c.is_ascii_alphabetic())
                && first.parse::<f64>().is_err() =>
        {
            (*first, rest)
        }
        _ => ("", args),
    }
}

// Convert a single point between grid and geographical coordinates
fn convert(grid: &impl NationalGrid, options: &Cli, args: &[&str]) -> Result<String, anyhow::Error> {
    let (letters, args) = split_square_prefix(args);
    if options.inverse && !letters.is_empty() {
        bail!("grid square letters are not meaningful for geographical input");
    }

    let v = numbers(args)?;
    if v.len() != 2 {
        bail!("expected 2 coordinates, got {}", v.len());
    }

    if options.inverse {
        let decimals = options.decimals.unwrap_or(3);
        let geo = Point::gis(v[0], v[1]);
        let point = grid.lonlat_to_grid(geo);
        let (square, within) = grid.to_grid_reference(point);
        let mut output = format!(
            "{:.decimals$} {:.decimals$}  {square} {:.decimals$} {:.decimals$}",
            point.x(),
            point.y(),
            within.x(),
            within.y()
        );
        if options.roundtrip {
            let back = grid.lonlat_to_grid(grid.grid_to_lonlat(point)?);
            output += &format!("  roundtrip: {:.3e}", back.distance_from(&point));
        }
        return Ok(output);
    }

    let decimals = options.decimals.unwrap_or(9);
    let point = grid.from_grid_reference(letters, (v[0], v[1]));
    let geo = grid.grid_to_lonlat(point)?;
    let square = grid.grid_to_grid_square(point);
    let deg = geo.to_degrees();
    let mut output = format!("{:.decimals$} {:.decimals$}  {square}", deg.x(), deg.y());
    if options.roundtrip {
        let back = grid.lonlat_to_grid(geo);
        output += &format!("  roundtrip: {:.3e}", back.distance_from(&point));
    }
    Ok(output)
}

// Distance and azimuths between two points given as "lon1 lat1 lon2 lat2"
fn geodesic(ellps: &Ellipsoid, options: &Cli, args: &[&str]) -> Result<String, anyhow::Error> {
    let v = numbers(args)?;
    if v.len() != 4 {
        bail!("expected 4 coordinates, got {}", v.len());
    }

    let mut arc = EllipsoidalArc::new(*ellps)?;
    arc.set_position_a(v[0].to_radians(), v[1].to_radians());
    arc.set_position_b(v[2].to_radians(), v[3].to_radians());
    let distance = arc.calculate_distance()?;
    let azimuth_a = arc.azimuth_a()?.to_degrees();
    let azimuth_b = arc.azimuth_b()?.to_degrees();

    let decimals = options.decimals.unwrap_or(4);
    let mut output = format!("{distance:.decimals$} {azimuth_a:.9} {azimuth_b:.9}");
    if options.roundtrip {
        // Walk the distance from A, and compare with B
        let b = arc.position_b()?;
        let reached = arc.calculate_position()?;
        let deviation = ellps.distance(&b, &reached)?;
        output += &format!("  roundtrip: {deviation:.3e}");
    }
    Ok(output)
}

// ----- T E S T S ---------------------------------------------------------------------

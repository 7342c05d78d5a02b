use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pupilgen::*;
use std::time;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pupil {
    /// MagAO-X bump mask
    BumpMask,
    /// MagAO-X large Lyot stop
    LyotStop,
    /// Giant Magellan Telescope primary
    Gmt,
}

/// Build a telescope pupil on a square grid and report how long it took.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(value_enum, default_value = "gmt")]
    pupil: Pupil,
    /// samples across the grid
    #[arg(short, long, default_value_t = 512)]
    npix: u32,
    /// use a unit-diameter pupil
    #[arg(long)]
    normalized: bool,
    /// leave out spiders, truss and bump cover
    #[arg(long)]
    no_spiders: bool,
    /// GMT segment undersize factor
    #[arg(long, default_value_t = 1.0)]
    undersize: f64,
    /// GMT truss leg width factor
    #[arg(long, default_value_t = 1.0)]
    spider_width: f64,
    /// GMT truss attachment plate size factor
    #[arg(long, default_value_t = 1.0)]
    truss_oversize: f64,
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(if args.verbose {LevelFilter::Debug} else {LevelFilter::Warn})
        .init();

    let now = time::Instant::now();
    let with_spiders = !args.no_spiders;
    let (aperture, segments, diameter) = match args.pupil {
        Pupil::BumpMask => (make_magaox_bump_mask(args.normalized, with_spiders), None, 6.5),
        Pupil::LyotStop => (make_magaox_large_lyot_stop(args.normalized, with_spiders), None, 6.5),
        Pupil::Gmt => {
            let (aperture, segments) = make_gmt_aperture(
                args.normalized,
                with_spiders,
                true,
                args.undersize,
                args.spider_width,
                args.truss_oversize,
            ).into_parts();
            (aperture, segments, GmtConfig::default().pupil_diameter)
        },
    };
    let diameter = if args.normalized {1.0} else {diameter};
    // leave a small margin around the pupil
    let grid = Grid::regular(args.npix, diameter * 1.02);
    println!("\nBuilding {:?} pupil", args.pupil);
    println!("npix:   {:10}", args.npix);
    println!("points: {:10}", grid.len());
    println!("{:10.2e} sec for initialising", 1e-6*(now.elapsed().as_micros() as f64));

    let now = time::Instant::now();
    let field = aperture.evaluate(&grid);
    println!("{:10.2e} sec for evaluating pupil", 1e-6*(now.elapsed().as_micros() as f64));
    println!("fill factor: {:.4}", field.fill_factor());

    if let Some(segments) = segments {
        let now = time::Instant::now();
        let fields: Vec<Field> = segments.iter().map(|s| s.evaluate(&grid)).collect();
        println!("{:10.2e} sec for evaluating segments", 1e-6*(now.elapsed().as_micros() as f64));
        for (i, f) in fields.iter().enumerate() {
            println!("segment {i}: fill factor {:.4}", f.fill_factor());
        }
    }
}

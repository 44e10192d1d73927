use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use sandfall::parse::parse_scan;
use sandfall::render::render_cropped;
use sandfall::{Coordinate, SimConfig, Simulation, Variant};

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Floor {
    Open,
    Closed,
    Both,
}

/// Pour sand into a scanned cave and count how much comes to rest.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rock scan, one path per line: `x,y -> x,y -> ...`
    #[arg(value_name = "SCAN")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = Floor::Both)]
    floor: Floor,

    /// Horizontal position of the sand source
    #[arg(long, default_value_t = 500, allow_negative_numbers = true)]
    source_x: i32,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..))]
    source_depth: i32,

    /// Rows between the deepest rock and the closed floor
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i32).range(1..))]
    floor_gap: i32,

    /// Columns kept beside the pile when rendering
    #[arg(long, value_name = "COLUMNS", default_value_t = 5)]
    padding: usize,

    /// Print the final grid after each run
    #[arg(long)]
    render: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        SimConfig {
            source: Coordinate::from_scan(self.source_x, self.source_depth),
            floor_gap: self.floor_gap,
            crop_padding: self.padding,
        }
    }

    fn variants(&self) -> &'static [Variant] {
        match self.floor {
            Floor::Open => &[Variant::OpenFloor],
            Floor::Closed => &[Variant::ClosedFloor],
            Floor::Both => &[Variant::OpenFloor, Variant::ClosedFloor],
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();

    let scan = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read scan {}", args.input.display()))?;
    let paths =
        parse_scan(&scan).with_context(|| format!("failed to parse {}", args.input.display()))?;
    info!("read {} rock paths", paths.len());

    for &variant in args.variants() {
        let mut sim = Simulation::from_paths(&paths, variant, &config)
            .with_context(|| format!("failed to build {variant} cave"))?;
        let report = sim.run().with_context(|| format!("{variant} run failed"))?;
        if args.render {
            println!("{}", render_cropped(sim.grid(), config.crop_padding));
        }
        println!("{variant}: {} units settled", report.settled);
    }
    Ok(())
}

//! Headless atom visualizer
//!
//! Builds the selected element, runs the frame loop and reports where the
//! particles ended up. The final instance list can be written out for a
//! renderer to pick up.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use serde_json::json;

use atom_chemistry::PeriodicTable;
use atom_simulation::{AtomSimulation, FrameReport, SimulationParams, VisualizationMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Electrons are free bodies held on a shell
    Free,
    /// Electrons sit on spinning rings
    Rings,
}

impl From<Mode> for VisualizationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Free => VisualizationMode::FreeElectrons,
            Mode::Rings => VisualizationMode::Rings,
        }
    }
}

/// Simulate an atom's nucleus and electrons
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Element name as spelled in the dataset (e.g. "Helium")
    #[arg(short, long)]
    element: Option<String>,

    /// Electron visualization mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Path to a JSON parameter file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Periodic table JSON to use instead of the embedded one
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Write the final instance transforms to this JSON file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn resolve_params(args: &Args) -> Result<SimulationParams, Box<dyn Error>> {
    let mut params = match &args.config {
        Some(path) => {
            let params = SimulationParams::from_file(path)?;
            log::info!("Loaded config from {}", path.display());
            params
        }
        None => match args.mode.unwrap_or(Mode::Free) {
            Mode::Free => SimulationParams::free_electrons("Helium"),
            Mode::Rings => SimulationParams::rings("Uranium"),
        },
    };

    if let Some(mode) = args.mode {
        params.mode = mode.into();
    }
    if let Some(element) = &args.element {
        params.element = element.clone();
    }
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }

    params.validate()?;
    Ok(params)
}

fn dump_instances(
    sim: &AtomSimulation,
    report: &FrameReport,
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    let instances: Vec<_> = sim
        .scene()
        .instances()
        .iter()
        .map(|instance| {
            json!({
                "kind": instance.kind,
                "position": instance.position,
                "rotation": instance.rotation,
                "radius": instance.radius,
                "tube": instance.tube,
                "color": instance.color,
            })
        })
        .collect();
    let count = instances.len();

    let document = json!({
        "element": sim.label(),
        "seed": sim.seed(),
        "frame": report.frame,
        "time": report.time,
        "instances": instances,
    });
    fs::write(path, serde_json::to_string_pretty(&document)?)?;
    log::info!("Wrote {} instances to {}", count, path.display());
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let params = resolve_params(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    let table = match &args.dataset {
        Some(path) => PeriodicTable::from_file(path)?,
        None => PeriodicTable::load()?,
    };
    log::info!("Periodic table: {} elements", table.len());

    let mut sim = AtomSimulation::new(params, table)?;
    println!("{}", sim.label());

    let report = sim.run(args.frames);
    log::info!(
        "Ran {} frames ({:.2}s): nucleus radius {:.3}, electron radius {:.3}, {} contacts",
        report.frame,
        report.time,
        report.max_nucleon_radius,
        report.max_electron_radius,
        report.contacts
    );

    if let Some(path) = &args.dump {
        dump_instances(&sim, &report, path)?;
    }
    Ok(())
}

fn main() {
    // RUST_LOG=debug for per-second frame summaries
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(error) = run(args) {
        log::error!("{}", error);
        process::exit(1);
    }
}

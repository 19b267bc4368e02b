use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::info;

use cutsim::{init_logging, SimulationConfig, SimulationContext};

struct Args {
    program: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    at: Option<f32>,
}

fn print_usage() {
    eprintln!(
        "cutsim {} ({})\n\
         Usage: cutsim <program.gcode> [output.png] [--config <file.json>] [--at <seconds>]",
        cutsim::VERSION,
        cutsim::BUILD_DATE
    );
}

fn parse_args() -> anyhow::Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut at = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().context("--config requires a file path")?;
                config = Some(PathBuf::from(value));
            }
            "--at" => {
                let value = args.next().context("--at requires a time in seconds")?;
                at = Some(value.parse::<f32>().context("--at value is not a number")?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.is_empty() {
        print_usage();
        bail!("missing G-code program path");
    }
    let program = positional.remove(0);
    let output = positional
        .pop()
        .unwrap_or_else(|| PathBuf::from("heightfield.png"));

    Ok(Args {
        program,
        output,
        config,
        at,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<SimulationConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    let mut sim = SimulationContext::new(config)?;

    let gcode = fs::read_to_string(&args.program)
        .with_context(|| format!("reading program {}", args.program.display()))?;
    sim.load_gcode(&gcode)?;
    info!(
        program = %args.program.display(),
        total_time = sim.total_time(),
        "program loaded"
    );

    if let Some(at) = args.at {
        sim.set_stop_at_time(at);
    }
    sim.tick();

    let tip = sim.cutter_position();
    info!(
        x = tip.x,
        y = tip.y,
        z = tip.z,
        stop_at_time = sim.stop_at_time(),
        max_depth = sim.heightfield().max_depth(),
        "simulation complete"
    );

    let field = sim.heightfield();
    let resolution = field.resolution() as u32;
    let pixels: Vec<u8> = field
        .data()
        .iter()
        .map(|depth| (depth.clamp(0.0, 1.0) * 255.0) as u8)
        .collect();
    let image = image::GrayImage::from_raw(resolution, resolution, pixels)
        .context("heightfield does not match its resolution")?;
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), "heightfield written");

    Ok(())
}

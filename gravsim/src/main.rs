use gravsim::{Scenario, ScenarioConfig, Universe};
use gravsim::{bench_gravity, bench_tick_curve};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Newtonian n-body simulation")]
struct Args {
    /// Scenario file under `scenarios/`; the built-in lunar orbit runs when omitted
    #[arg(short, long)]
    file_name: Option<String>,

    /// Override the number of frames to report
    #[arg(long)]
    frames: Option<u64>,

    /// Run the timing harness instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let Some(file_name) = &args.file_name else {
        return Ok(Scenario::lunar_orbit()?);
    };

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let scenario_cfg = ScenarioConfig::from_file(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    Ok(Scenario::build_scenario(scenario_cfg)?)
}

fn report(frame: u64, universe: &Universe) {
    for p in universe.particles() {
        let x = p.position().components();
        println!(
            "{},{},{},{:.6e},{:.6e},{:.6e},{:.6e}",
            frame,
            universe.steps(),
            p.name(),
            x.x,
            x.y,
            x.z,
            p.velocity().magnitude
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity()?;
        bench_tick_curve()?;
        return Ok(());
    }

    let Scenario { simulation, mut universe } = load_scenario(&args)?;
    let frames = args.frames.unwrap_or(simulation.frames);

    info!(
        "running {} frames of {} ticks ({} s per tick)",
        frames,
        simulation.ticks_per_frame,
        universe.tick_length()
    );

    println!("frame,step,name,x,y,z,speed");
    report(0, &universe);
    for frame in 1..=frames {
        universe
            .advance(simulation.ticks_per_frame)
            .with_context(|| format!("simulation stopped in frame {}", frame))?;
        report(frame, &universe);
    }

    let com = universe.centre_of_mass();
    info!(
        "finished after {} ticks ({} s simulated), centre of mass {:?}, momentum {:.6e}",
        universe.steps(),
        universe.elapsed(),
        com.map(|c| c.components()),
        universe.total_momentum().norm()
    );

    Ok(())
}

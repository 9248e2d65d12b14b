//! Wealth Simulation Driver
//!
//! Builds a model from CLI arguments or a TOML file, runs it for a fixed
//! number of ticks, writes periodic JSON snapshots, and prints a wealth
//! distribution summary at the end.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use wealth_sim::output::{capture, write_snapshot_to_dir, WealthStats};
use wealth_sim::{Model, SimConfig, SimEvent};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "wealth_sim")]
#[command(about = "Wealth-exchange simulation on a toroidal grid")]
struct Args {
    /// Number of agents
    #[arg(long, default_value_t = 100)]
    agents: usize,

    /// Grid width in cells
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Random seed for reproducibility (drawn from OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Interval between snapshots in ticks (0 disables snapshots)
    #[arg(long, default_value_t = 0)]
    snapshot_interval: u64,

    /// Snapshot output directory
    #[arg(long, default_value = "output/snapshots")]
    output_dir: PathBuf,

    /// Load simulation parameters from a TOML file instead of the flags
    /// above
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimConfig::from_toml_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        None => SimConfig::new(args.agents, args.width, args.height, args.seed),
    };

    let mut model = match Model::new(config.clone()) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    println!("Wealth Simulation");
    println!("=================");
    println!("Agents: {}", model.agent_count());
    println!("Grid: {}x{}", config.width, config.height);
    println!("Seed: {}", model.seed());
    println!("Ticks: {}", args.ticks);
    println!();

    for tick in 0..args.ticks {
        model.tick();

        let events = model.drain_events();
        if tick % 10 == 0 && !events.is_empty() {
            let mut move_count = 0;
            let mut transfer_count = 0;
            for event in &events {
                match event {
                    SimEvent::Moved { .. } => move_count += 1,
                    SimEvent::Transferred { .. } => transfer_count += 1,
                }
            }
            println!(
                "[Tick {:>4}] {} events (moves: {}, transfers: {})",
                tick,
                events.len(),
                move_count,
                transfer_count
            );
        }

        if args.snapshot_interval > 0 && (tick + 1) % args.snapshot_interval == 0 {
            let snapshot = capture(&model);
            match write_snapshot_to_dir(&snapshot, &args.output_dir) {
                Ok(path) => println!("  Wrote {}", path.display()),
                Err(e) => eprintln!("  Warning: could not write snapshot: {}", e),
            }
        }
    }

    let stats = WealthStats::from_snapshot(&model.snapshot());
    println!();
    println!("Final wealth distribution");
    println!("  total: {}", stats.total);
    println!("  min/max: {}/{}", stats.min, stats.max);
    println!("  mean: {:.3}", stats.mean);
    println!("  gini: {:.3}", stats.gini);
    for (wealth, count) in stats.histogram.iter().enumerate() {
        if *count > 0 {
            println!("  wealth {:>3}: {}", wealth, count);
        }
    }
}

//! pagesim - paged memory allocation and page-replacement simulator
//!
//! Commands:
//! - `pagesim run` - Allocate frames for a set of processes, apply scripted operations and
//!   print the memory map, process list, usage statistics and FIFO/LRU comparison
//! - `pagesim compare` - Run only the FIFO/LRU comparison

#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pagesim_memory::config::{SimulationConfig, DEFAULT_FAULT_DELAY_US};
use pagesim_memory::memory_manager::{AllocationOutcome, MemoryManager};
use pagesim_memory::simulator::ReplacementSimulator;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pagesim")]
#[command(version)]
#[command(about = "Paged memory allocation and FIFO/LRU replacement simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate memory for a set of processes and print every report
    Run(RunArgs),

    /// Compare FIFO and LRU over the trace 1, 2, ..., N
    Compare {
        /// Number of frames
        #[arg(long)]
        frames: usize,

        /// Length of the reference string
        #[arg(long)]
        pages: usize,

        /// Seed for the simulated fragmentation figure
        #[arg(long)]
        seed: Option<u64>,

        /// Delay slept on every fault, in microseconds
        #[arg(long, default_value_t = DEFAULT_FAULT_DELAY_US)]
        fault_delay_us: u64,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Scenario file in TOML format
    #[arg(long, conflicts_with_all = ["frames", "page_size", "require"])]
    config: Option<PathBuf>,

    /// Number of frames
    #[arg(long)]
    frames: Option<usize>,

    /// Page size in KB
    #[arg(long)]
    page_size: Option<u32>,

    /// Memory requirement of a process in KB; repeat once per process
    #[arg(long)]
    require: Vec<u32>,

    /// Seed for the simulated fragmentation figure
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the FIFO/LRU comparison
    #[arg(long)]
    no_performance: bool,
}

impl RunArgs {
    fn load_config(&self) -> Result<SimulationConfig> {
        let config = match &self.config {
            Some(path) => {
                let source = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                SimulationConfig::from_toml(&source)
                    .with_context(|| format!("Invalid scenario {}", path.display()))?
            }
            None => {
                let frames = self.frames.context("--frames is required without --config")?;
                let page_size = self
                    .page_size
                    .context("--page-size is required without --config")?;
                SimulationConfig::new(frames, page_size, self.require.clone())
            }
        };
        // A seed on the command line wins over the one in the scenario.
        let seed = self.seed.or(config.seed);
        let config = config.with_seed(seed);
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(&args)?,

        Commands::Compare {
            frames,
            pages,
            seed,
            fault_delay_us,
        } => {
            let report = ReplacementSimulator::new(frames, pages)?
                .with_fault_delay(Duration::from_micros(fault_delay_us))
                .with_seed(seed)
                .run();
            println!("{}", report);
        }
    }

    Ok(())
}

fn run(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;
    log::info!(
        "Simulating {} frames of {} KB for {} processes",
        config.total_frames,
        config.page_size_kb,
        config.processes.len()
    );

    let mut manager = MemoryManager::new(&config)?;
    let outcomes = manager.allocate()?;
    report_outcomes(&outcomes);
    println!("{}\n", manager.frames());

    for operation in &config.operations {
        log::info!("Applying {:?}", operation);
        // A failed operation is reported and the scenario carries on.
        match manager.apply(operation) {
            Ok(outcomes) => report_outcomes(&outcomes),
            Err(e) => log::error!("{}", e),
        }
    }

    println!("{}\n", manager.frames());
    println!("{}\n", manager.processes());
    println!("{}\n", manager.memory_usage());

    if !args.no_performance {
        println!("{}", manager.performance_report()?);
    }
    Ok(())
}

fn report_outcomes(outcomes: &[AllocationOutcome]) {
    let failed = outcomes.iter().filter(|o| !o.is_satisfied()).count();
    if failed > 0 {
        log::warn!("{} of {} processes are waiting for memory", failed, outcomes.len());
    }
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cpusim::{
    SimConfig, Simulator,
    core::Ticks,
    scheduler::{FcfsScheduler, PriorityScheduler, Scheduler},
    sim::{RandomWorkload, RandomWorkloadConfig},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Fcfs,
    Priority,
}

/// Simulate a single CPU scheduling a randomly generated workload.
#[derive(Debug, Parser)]
struct Opts {
    /// Seed for the workload generator.
    #[clap(long, default_value = "1")]
    seed: u64,

    /// Ticks a process may run per dispatch before it is preempted.
    #[clap(short = 'q', long, default_value = "100")]
    quantum: Ticks,

    /// Stop the simulation at this tick.
    #[clap(short = 't', long, default_value = "20")]
    max_time: Ticks,

    /// Probability of a new process arriving on each tick.
    #[clap(long, default_value = "1.0")]
    arrival_probability: f64,

    /// Maximum number of CPU bursts per process.
    #[clap(long, default_value = "5")]
    max_bursts: u32,

    /// Mean CPU burst length in ticks.
    #[clap(long, default_value = "5.0")]
    avg_burst_time: f64,

    /// Selection policy.
    #[clap(short = 'p', long, value_enum, default_value = "fcfs")]
    policy: Policy,

    /// Enable verbose output. Specify multiple times to increase verbosity.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let workload = RandomWorkload::new(RandomWorkloadConfig {
        arrival_probability: opts.arrival_probability,
        max_bursts: opts.max_bursts,
        avg_burst_time: opts.avg_burst_time,
        seed: opts.seed,
    })
    .context("invalid workload configuration")?;
    let config = SimConfig::new(opts.quantum, opts.max_time)
        .context("invalid simulation configuration")?;

    let scheduler: Box<dyn Scheduler> = match opts.policy {
        Policy::Fcfs => Box::new(FcfsScheduler),
        Policy::Priority => Box::new(PriorityScheduler),
    };

    let mut sim = Simulator::new(scheduler, workload, config)?;
    let summary = sim.run().context("simulation aborted")?;

    println!("\nSimulation finished\n");
    for p in sim.processes() {
        println!(
            "PID={}, arrival={}, waiting={}, bursts={:?}",
            p.pid(),
            p.arrival_time(),
            p.waiting_time(),
            p.history()
        );
    }
    println!("\n{summary}");

    Ok(())
}

//! rrsim — drive the aging round-robin policy over a synthetic task set.
//!
//! Spawns one task per `--task LEVEL` flag, runs the dispatcher for the
//! requested number of ticks and reports per-task placement plus the
//! scheduler counters. Useful for watching rotation and aging interact
//! under different tunable settings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use rr_aging::{Dispatcher, Level, Pid, Scheduler, Tick, Tunables, NR_LEVELS};

/// Drive the aging round-robin scheduler over a synthetic task set.
#[derive(Debug, Parser)]
#[command(name = "rrsim")]
struct Opts {
    /// Round-robin timeslice in ticks.
    #[clap(short = 's', long, default_value = "100")]
    timeslice: Tick,

    /// Aging threshold in ticks (default: 3x the timeslice).
    #[clap(short = 'a', long)]
    age_threshold: Option<Tick>,

    /// Spawn a CPU-bound task at the given level (0..=4, 0 most urgent).
    /// Repeat the flag for more tasks.
    #[clap(short = 't', long = "task", value_name = "LEVEL")]
    tasks: Vec<usize>,

    /// Ticks to simulate; 0 runs until Ctrl-C.
    #[clap(short = 'n', long, default_value = "1000")]
    ticks: Tick,

    /// Report interval in ticks.
    #[clap(short = 'r', long, default_value = "100")]
    report_interval: Tick,

    /// Enable verbose output (per-event trace).
    #[clap(short = 'v', long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

fn report(host: &Dispatcher, pids: &[Pid]) {
    info!("tick={} current={:?}", host.now(), host.current());
    for &pid in pids {
        if let Some(ctx) = host.sched().task(pid) {
            info!(
                "  task {pid}: level={} quantum={} age={} queued={}",
                ctx.level(),
                ctx.quantum,
                ctx.age_count,
                ctx.location.is_some(),
            );
        }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let loglevel = if opts.verbose {
        simplelog::LevelFilter::Trace
    } else {
        simplelog::LevelFilter::Info
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        loglevel,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    if opts.tasks.is_empty() {
        bail!("no tasks given, use --task LEVEL at least once");
    }
    if let Some(&bad) = opts.tasks.iter().find(|&&l| l >= NR_LEVELS) {
        bail!("task level {bad} out of range 0..={}", NR_LEVELS - 1);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::Relaxed);
    })
    .context("Error setting Ctrl-C handler")?;

    let age_threshold = opts.age_threshold.unwrap_or(3 * opts.timeslice);
    let tunables = Arc::new(Tunables::new(opts.timeslice, age_threshold));
    let mut host = Dispatcher::new(Scheduler::new(tunables));

    let pids: Vec<Pid> = (1..=opts.tasks.len() as i32).map(Pid).collect();
    for (&pid, &level) in pids.iter().zip(&opts.tasks) {
        host.spawn(pid, Level(level).to_prio());
        info!("spawned task {pid} at {}", Level(level));
    }

    while !shutdown.load(Ordering::Relaxed) && (opts.ticks == 0 || host.now() < opts.ticks) {
        host.tick();
        if opts.report_interval > 0 && host.now() % opts.report_interval == 0 {
            report(&host, &pids);
        }
    }

    report(&host, &pids);
    println!("{}", host.sched().stats());

    Ok(())
}

use std::{fs::File, io::BufWriter, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use ljbox::{cli::SimArgs, run, Mode, TrajectoryWriter};
use tracing::error;

/// Lennard-Jones particles in a box, ranks exchanging positions every step
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    sim: SimArgs,

    /// Number of ranks
    #[arg(short = 'r', long, default_value_t = 4)]
    ranks: usize,

    /// Worker threads inside each rank
    #[arg(long, default_value_t = 1)]
    threads_per_rank: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.sim.init_logging();
    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: &Cli) -> Result<()> {
    let params = cli.sim.to_params();
    let file = File::create(&params.output)
        .with_context(|| format!("Could not open {}", params.output.display()))?;
    let mut writer = TrajectoryWriter::new(BufWriter::new(file));
    let mode = Mode::Distributed {
        ranks: cli.ranks,
        threads_per_rank: cli.threads_per_rank,
    };
    let summary = run(&params, mode, &mut writer).context("Simulation failed")?;
    if summary.particles < summary.requested {
        tracing::info!(
            "Ran with {} of {} requested particles",
            summary.particles,
            summary.requested
        );
    }
    Ok(())
}

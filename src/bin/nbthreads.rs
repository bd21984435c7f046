use std::{fs::File, io::BufWriter, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use ljbox::{cli::SimArgs, run, Mode, TrajectoryWriter};
use tracing::error;

/// Lennard-Jones particles in a box, shared-memory worker pool
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    sim: SimArgs,

    /// Number of worker threads
    #[arg(short = 'p', long, default_value_t = 4)]
    threads: usize,
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
    let mode = Mode::Threaded {
        threads: cli.threads,
    };
    run(&params, mode, &mut writer).context("Simulation failed")?;
    Ok(())
}

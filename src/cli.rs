//! Command line options shared by the three binaries.

use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::Params;

/// Physical and output options common to every execution mode
#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    /// Trajectory output file
    #[arg(short = 'o', long, default_value = "run.out")]
    pub output: PathBuf,

    /// Number of particles
    #[arg(short = 'n', long = "particles", default_value_t = 500)]
    pub npart: usize,

    /// Number of frames, including the initial one
    #[arg(short = 'F', long = "frames", default_value_t = 400)]
    pub nframes: usize,

    /// Time steps per frame
    #[arg(short = 'f', long = "steps-per-frame", default_value_t = 50)]
    pub npframe: usize,

    /// Time step
    #[arg(short = 't', long = "dt", default_value_t = 1e-4)]
    pub dt: f64,

    /// Lennard-Jones well depth
    #[arg(short = 'e', long = "epsilon", default_value_t = 1.0)]
    pub eps: f64,

    /// Lennard-Jones range
    #[arg(short = 's', long, default_value_t = 1e-2)]
    pub sigma: f64,

    /// Strength of the downward field
    #[arg(short = 'g', long, default_value_t = 1.0)]
    pub gravity: f64,

    /// Initial temperature
    #[arg(short = 'T', long = "temperature", default_value_t = 1.0)]
    pub t0: f64,

    /// Seed for placement and velocities (random if absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log kinetic, potential and total energy at every frame
    #[arg(long)]
    pub energy: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl SimArgs {
    pub fn to_params(&self) -> Params {
        Params {
            output: self.output.clone(),
            npart: self.npart,
            nframes: self.nframes,
            npframe: self.npframe,
            dt: self.dt,
            eps: self.eps,
            sigma: self.sigma,
            gravity: self.gravity,
            t0: self.t0,
            seed: self.seed,
            monitor_energy: self.energy,
        }
    }

    pub fn init_logging(&self) {
        init_logging(self.verbose, self.quiet);
    }
}

/// Install the global subscriber. `RUST_LOG` applies when neither flag is set.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        sim: SimArgs,
    }

    #[test]
    fn defaults_match_params() {
        let cli = Cli::try_parse_from(["nb"]).unwrap();
        assert_eq!(cli.sim.to_params(), Params::default());
    }

    #[test]
    fn short_options() {
        let cli = Cli::try_parse_from([
            "nb", "-o", "x.out", "-n", "20", "-F", "3", "-f", "7", "-t", "0.001", "-e", "2", "-s",
            "0.02", "-g", "0", "-T", "0.5", "--seed", "9", "--energy",
        ])
        .unwrap();
        let params = cli.sim.to_params();
        assert_eq!(params.output, PathBuf::from("x.out"));
        assert_eq!(params.npart, 20);
        assert_eq!(params.nframes, 3);
        assert_eq!(params.npframe, 7);
        assert_eq!(params.dt, 0.001);
        assert_eq!(params.eps, 2.0);
        assert_eq!(params.sigma, 0.02);
        assert_eq!(params.gravity, 0.0);
        assert_eq!(params.t0, 0.5);
        assert_eq!(params.seed, Some(9));
        assert!(params.monitor_energy);
    }

    #[test]
    fn malformed_number_is_rejected() {
        assert!(Cli::try_parse_from(["nb", "-n", "many"]).is_err());
    }
}

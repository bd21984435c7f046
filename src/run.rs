//! Complete runs in each execution mode.

use std::{io, sync::Mutex};

use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    forces::{ForceEvaluator, ForceField, LocalGlobal, PairwiseSymmetric, ThreadedSymmetric},
    output::{Discard, FrameWriter},
    parallel::{build_pool, Cluster, Communicator, SingleProcess},
    Error, Params, Result, RunSummary, Simulation,
};

/// How the work of a run is spread out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// One thread, every pair once
    Serial,
    /// One process, a pool of `threads` workers sharing the particle arrays
    Threaded { threads: usize },
    /// `ranks` units exchanging positions by message every step, each with
    /// `threads_per_rank` workers for its own rows
    Distributed {
        ranks: usize,
        threads_per_rank: usize,
    },
}

/// Run a whole simulation and write its trajectory to `writer`
pub fn run<W: FrameWriter + Send>(
    params: &Params,
    mode: Mode,
    writer: &mut W,
) -> Result<RunSummary> {
    params.validate()?;
    info!(
        ?mode,
        npart = params.npart,
        nframes = params.nframes,
        npframe = params.npframe,
        "starting run"
    );
    let field = ForceField::from_params(params);

    let summary = match mode {
        Mode::Serial => {
            let force = PairwiseSymmetric::new(field);
            let sim = Simulation::new(params.clone(), SingleProcess, force)?;
            drive(sim, writer)?
        }
        Mode::Threaded { threads } => {
            let pool = build_pool(threads, "nbthreads")?;
            let force = ThreadedSymmetric::new(field, pool.clone());
            let sim = Simulation::new(params.clone(), SingleProcess, force)?.with_workers(pool);
            drive(sim, writer)?
        }
        Mode::Distributed {
            ranks,
            threads_per_rank,
        } => {
            if threads_per_rank == 0 {
                return Err(Error::config("number of threads per rank should be positive"));
            }
            let writer = Mutex::new(writer);
            let summaries = Cluster::new(ranks)?.run(|domain| {
                let rank = domain.rank();
                let pool = if threads_per_rank > 1 {
                    Some(build_pool(threads_per_rank, &format!("rank-{}", rank))?)
                } else {
                    None
                };
                let sim = match pool {
                    Some(pool) => Simulation::new(
                        params.clone(),
                        domain,
                        LocalGlobal::with_pool(field, pool.clone()),
                    )?
                    .with_workers(pool),
                    None => Simulation::new(params.clone(), domain, LocalGlobal::new(field))?,
                };

                if rank == 0 {
                    let mut guard = writer.lock().map_err(|_| {
                        Error::Io(io::Error::new(
                            io::ErrorKind::Other,
                            "trajectory writer lock poisoned",
                        ))
                    })?;
                    drive(sim, &mut **guard)
                } else {
                    drive(sim, &mut Discard)
                }
            })?;
            summaries
                .into_iter()
                .next()
                .ok_or_else(|| Error::comm("run finished without any rank"))?
        }
    };

    info!(
        particles = summary.particles,
        steps = summary.steps,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "run finished"
    );
    Ok(summary)
}

/// Place, distribute and step one unit through the whole run
fn drive<C, F>(mut sim: Simulation<C, F>, writer: &mut dyn FrameWriter) -> Result<RunSummary>
where
    C: Communicator,
    F: ForceEvaluator,
{
    let mut rng = unit_rng(sim.params().seed, sim.comm().rank());
    sim.place(&mut rng);
    sim.distribute(&mut rng)?;
    sim.run(writer)
}

/// Independent stream per unit: `seed + rank` when seeded, entropy otherwise
pub fn unit_rng(seed: Option<u64>, rank: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(rank as u64)),
        None => StdRng::from_entropy(),
    }
}

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use rand::Rng;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::{
    compute::{self, Energies},
    forces::ForceEvaluator,
    output::FrameWriter,
    parallel::Communicator,
    particles::{init_particles_random, Particles},
    region::Rect,
    Container, Error, Integrator, Params, Partition, Result, Verlet,
};

/// Where a simulation is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    /// The root holds the initial positions
    Placed,
    /// Every unit knows the final count, the partition and its own particles
    Partitioned,
    /// `frame` frames written so far, `substep` steps into the current one
    Stepping { frame: usize, substep: usize },
    Done,
}

/// What a finished run did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub particles: usize,
    pub frames: usize,
    pub steps: usize,
    /// Wall-clock time spent in [`Simulation::run`]
    pub elapsed: Duration,
}

/// One unit's view of a run, with one copy held by each rank.
///
/// In single-process modes the unit owns every particle and the global
/// position array is just a mirror of the local one.
pub struct Simulation<C: Communicator, F: ForceEvaluator> {
    params: Params,
    comm: C,
    force: F,
    integrator: Verlet,
    container: Container,
    workers: Option<Arc<ThreadPool>>,
    partition: Partition,
    chunks: Partition,
    positions: Vec<[f64; 2]>,
    local: Particles,
    stage: Stage,
    steps: usize,
}
impl<C: Communicator, F: ForceEvaluator> Simulation<C, F> {
    /// Create a new simulation
    pub fn new(params: Params, comm: C, force: F) -> Result<Self> {
        params.validate()?;
        if comm.size() > 1 && !force.supports_partial_ranges() {
            return Err(Error::config(
                "a multi-rank run needs a force field that works on owned ranges",
            ));
        }
        Ok(Self {
            params,
            comm,
            force,
            integrator: Verlet::new(),
            container: Container::unit(),
            workers: None,
            partition: Partition::new(0, 1),
            chunks: Partition::new(0, 1),
            positions: Vec::new(),
            local: Particles::new(),
            stage: Stage::Uninitialized,
            steps: 0,
        })
    }

    /// Spread integration and reflection of the owned particles over `pool`.
    /// Must be set before [`Simulation::distribute`].
    pub fn with_workers(mut self, pool: Arc<ThreadPool>) -> Self {
        self.workers = Some(pool);
        self
    }

    // Getters
    pub fn params(&self) -> &Params {
        &self.params
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn comm(&self) -> &C {
        &self.comm
    }
    /// Every particle's position as of the last exchange
    pub fn positions(&self) -> &[[f64; 2]] {
        &self.positions
    }
    /// The particles this unit owns
    pub fn local(&self) -> &Particles {
        &self.local
    }
    pub fn partition(&self) -> &Partition {
        &self.partition
    }
    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }
    pub fn steps(&self) -> usize {
        self.steps
    }

    // Initialization

    /// Draw the initial positions on the root by rejection sampling.
    ///
    /// Falling short of the requested count is not an error: the run goes on
    /// with however many particles fit.
    pub fn place<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.comm.is_root() {
            let positions =
                init_particles_random(&Rect::unit(), self.params.npart, self.params.sigma, rng);
            if positions.len() < self.params.npart {
                warn!(
                    "Could not generate {} particles; trying {}",
                    self.params.npart,
                    positions.len()
                );
            }
            self.positions = positions;
        }
        self.stage = Stage::Placed;
    }

    /// Use the given initial positions instead of random ones (root only)
    pub fn place_at(&mut self, positions: Vec<[f64; 2]>) {
        if self.comm.is_root() {
            self.positions = positions;
        }
        self.stage = Stage::Placed;
    }

    /// Share the root's positions, build the partition, take this unit's
    /// slice and draw its velocities.
    pub fn distribute<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        assert_eq!(self.stage, Stage::Placed, "Particles should be placed first");

        let n = self.comm.broadcast_count(self.positions.len())?;
        if n == 0 {
            return Err(Error::NoParticles);
        }
        self.positions.resize(n, [0.0; 2]);
        self.comm.broadcast_positions(&mut self.positions)?;

        self.partition = Partition::new(n, self.comm.size());
        let range = self.partition.range(self.comm.rank());
        self.local = Particles::from_slice(&self.positions, range);
        self.local.set_temperature(self.params.t0, rng);

        let num_workers = self.workers.as_ref().map_or(1, |p| p.current_num_threads());
        self.chunks = Partition::new(self.local.num_particles(), num_workers);
        self.stage = Stage::Partitioned;
        debug!(
            rank = self.comm.rank(),
            nlocal = self.local.num_particles(),
            "partitioned"
        );
        Ok(())
    }

    // Run methods

    /// Write the header and first frame (root only), then evaluate the
    /// initial forces
    pub fn start(&mut self, writer: &mut dyn FrameWriter) -> Result<()> {
        assert_eq!(
            self.stage,
            Stage::Partitioned,
            "Particles should be distributed before starting"
        );
        if self.comm.is_root() {
            writer.write_header(self.num_particles())?;
            writer.write_frame(&self.positions)?;
        }
        self.compute_forces()?;
        self.stage = Stage::Stepping {
            frame: 1,
            substep: 0,
        };
        Ok(())
    }

    /// Advance every owned particle by one time step
    pub fn step(&mut self) -> Result<()> {
        let (frame, substep) = match self.stage {
            Stage::Stepping { frame, substep } => (frame, substep),
            stage => panic!("Simulation should be started before stepping, found {:?}", stage),
        };

        self.pre_forward_comm();
        self.forward_comm()?;
        self.compute_forces()?;
        self.post_force();

        self.steps += 1;
        self.stage = Stage::Stepping {
            frame,
            substep: substep + 1,
        };
        Ok(())
    }

    /// Run every frame. Only the root writes to `writer`.
    pub fn run(&mut self, writer: &mut dyn FrameWriter) -> Result<RunSummary> {
        let started = Instant::now();
        self.start(writer)?;
        self.monitor(0)?;

        for frame in 1..self.params.nframes {
            for _ in 0..self.params.npframe {
                self.step()?;
            }
            if self.comm.is_root() {
                writer.write_frame(&self.positions)?;
            }
            self.stage = Stage::Stepping {
                frame: frame + 1,
                substep: 0,
            };
            self.monitor(frame)?;
        }

        if self.comm.is_root() {
            writer.flush()?;
        }
        self.stage = Stage::Done;

        Ok(RunSummary {
            requested: self.params.npart,
            particles: self.num_particles(),
            frames: self.params.nframes,
            steps: self.steps,
            elapsed: started.elapsed(),
        })
    }

    /// Energies of the whole system. Collective: every unit must call it.
    pub fn energies(&self) -> Result<Energies> {
        let range = self.partition.range(self.comm.rank());
        let kinetic = self
            .comm
            .all_reduce_sum(compute::kinetic_energy(self.local.velocities()))?;
        let potential = self.comm.all_reduce_sum(compute::potential_energy(
            self.force.force_field(),
            &self.positions,
            range,
        ))?;
        Ok(Energies {
            kinetic,
            potential,
            temperature: compute::temperature(kinetic, self.num_particles()),
        })
    }

    fn monitor(&self, frame: usize) -> Result<()> {
        if !self.params.monitor_energy {
            debug!(frame, "frame");
            return Ok(());
        }
        let e = self.energies()?;
        if self.comm.is_root() {
            info!(
                frame,
                kinetic = e.kinetic,
                potential = e.potential,
                total = e.total(),
                temperature = e.temperature,
                "energy"
            );
        }
        Ok(())
    }

    // Step phases

    /// Half kick, drift and reflection of the owned particles
    fn pre_forward_comm(&mut self) {
        let dt = self.params.dt;
        let integrator = self.integrator;
        let container = self.container;
        let Particles {
            positions,
            velocities,
            accelerations,
        } = &mut self.local;

        match &self.workers {
            Some(pool) => {
                let xs = self.chunks.split_mut(positions);
                let vs = self.chunks.split_mut(velocities);
                let accs = self.chunks.split_mut(accelerations);
                pool.scope(|s| {
                    for ((x, v), a) in xs.into_iter().zip(vs).zip(accs) {
                        s.spawn(move |_| {
                            integrator.pre_forward_comm(dt, x, v, a);
                            container.apply_reflect(x, v, a);
                        });
                    }
                });
            }
            None => {
                integrator.pre_forward_comm(dt, positions, velocities, accelerations);
                container.apply_reflect(positions, velocities, accelerations);
            }
        }
    }

    /// Publish the updated owned positions and collect everyone else's
    fn forward_comm(&mut self) -> Result<()> {
        self.comm
            .all_gather(&self.local.positions, &self.partition, &mut self.positions)
    }

    fn compute_forces(&mut self) -> Result<()> {
        let range = self.partition.range(self.comm.rank());
        self.force
            .accelerations(&self.positions, range, &mut self.local.accelerations)
    }

    /// Second half kick with the freshly computed accelerations
    fn post_force(&mut self) {
        let dt = self.params.dt;
        let integrator = self.integrator;
        let Particles {
            velocities,
            accelerations,
            ..
        } = &mut self.local;

        match &self.workers {
            Some(pool) => {
                let vs = self.chunks.split_mut(velocities);
                let accs = self.chunks.split_mut(accelerations);
                pool.scope(|s| {
                    for (v, a) in vs.into_iter().zip(accs) {
                        s.spawn(move |_| integrator.post_force(dt, v, a));
                    }
                });
            }
            None => integrator.post_force(dt, velocities, accelerations),
        }
    }
}

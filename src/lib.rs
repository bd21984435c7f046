pub mod atomic;
pub mod cli;
pub mod compute;
pub mod container;
pub mod error;
pub mod forces;
pub mod integrators;
pub mod output;
pub mod parallel;
pub mod params;
pub mod particles;
pub mod partition;
pub mod region;
pub mod run;
pub mod simulation;

pub use atomic::{LJCut, None_, PairPotential, Potential};
pub use container::Container;
pub use error::{Error, Result};
pub use forces::{
    ExternalField, ForceEvaluator, ForceField, LocalGlobal, PairwiseSymmetric, ThreadedSymmetric,
};
pub use integrators::*;
pub use output::{FrameWriter, MemoryTrajectory, TrajectoryWriter};
pub use parallel::{Cluster, Communicator, Domain, SingleProcess};
pub use params::Params;
pub use particles::Particles;
pub use partition::Partition;
pub use run::{run, Mode};
pub use simulation::{RunSummary, Simulation, Stage};

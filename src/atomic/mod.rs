pub mod ljcut;
pub mod none;

pub use ljcut::{lj_potential, lj_scalar_force, LJCut};
pub use none::None_;

use enum_dispatch::enum_dispatch;

/// Trait for radially symmetric pair potentials
///
/// Everything is expressed in terms of the squared separation so that no
/// square root is needed inside the pair loops.
#[enum_dispatch]
pub trait PairPotential {
    /// Squared distance at and beyond which the force vanishes
    fn cutoff_squared(&self) -> f64;

    /// Coefficient `C` such that the force on particle i from particle j is
    /// `C * (x_j - x_i)`
    fn scalar_force(&self, r2: f64) -> f64;

    /// Pair energy at squared distance `r2`
    fn energy(&self, r2: f64) -> f64;
}

/// The pair potentials a force field can be built on
#[enum_dispatch(PairPotential)]
#[derive(Clone, Copy, Debug)]
pub enum Potential {
    LJCut,
    None_,
}

impl Potential {
    /// Lennard-Jones with the parameters of a run
    pub fn from_params(params: &crate::Params) -> Self {
        LJCut::new(params.eps, params.sigma).into()
    }
}

mod verlet;
pub use verlet::Verlet;

/// Simulation integrator
///
/// Both hooks run over the particles a unit owns and never look at any
/// other unit's particles.
pub trait Integrator {
    /// Runs before positions are exchanged and forces recomputed
    fn pre_forward_comm(
        &self,
        _dt: f64,
        _positions: &mut [[f64; 2]],
        _velocities: &mut [[f64; 2]],
        _accelerations: &[[f64; 2]],
    ) {
    }
    /// Runs once accelerations at the new positions are known
    fn post_force(&self, _dt: f64, _velocities: &mut [[f64; 2]], _accelerations: &[[f64; 2]]) {}
}

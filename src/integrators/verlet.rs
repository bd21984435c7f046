use super::*;

/// Velocity-verlet (leapfrog) integrator
#[derive(Clone, Copy, Debug, Default)]
pub struct Verlet {}

impl Verlet {
    pub fn new() -> Self {
        Self {}
    }
    /// Steps the velocities by half a timestep
    fn increment_velocity_halfstep(
        dt: f64,
        velocities: &mut [[f64; 2]],
        accelerations: &[[f64; 2]],
    ) {
        let half_ts = 0.5 * dt;
        for (v, a) in velocities.iter_mut().zip(accelerations) {
            v[0] += half_ts * a[0];
            v[1] += half_ts * a[1];
        }
    }
    /// Steps the positions forward with the current (half-step) velocities
    fn increment_positions(dt: f64, positions: &mut [[f64; 2]], velocities: &[[f64; 2]]) {
        for (x, v) in positions.iter_mut().zip(velocities) {
            x[0] += dt * v[0];
            x[1] += dt * v[1];
        }
    }
}

impl Integrator for Verlet {
    // v(t + dt/2) = v(t) + a(t) dt/2, then x(t + dt) = x(t) + v(t + dt/2) dt
    fn pre_forward_comm(
        &self,
        dt: f64,
        positions: &mut [[f64; 2]],
        velocities: &mut [[f64; 2]],
        accelerations: &[[f64; 2]],
    ) {
        Verlet::increment_velocity_halfstep(dt, velocities, accelerations);
        Verlet::increment_positions(dt, positions, velocities);
    }
    // v(t + dt) = v(t + dt/2) + a(t + dt) dt/2
    fn post_force(&self, dt: f64, velocities: &mut [[f64; 2]], accelerations: &[[f64; 2]]) {
        Verlet::increment_velocity_halfstep(dt, velocities, accelerations);
    }
}

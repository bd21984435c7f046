/// Temperature of `num_particles` unit-mass particles in two dimensions,
/// `KE / n` with Boltzmann's constant taken as one
pub fn temperature(kinetic_energy: f64, num_particles: usize) -> f64 {
    if num_particles == 0 {
        return 0.0;
    }
    kinetic_energy / num_particles as f64
}

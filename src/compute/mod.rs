//! Energy monitoring. Not used by the stepping itself.

mod kinetic_energy;
mod potential_energy;
mod temperature;

pub use kinetic_energy::kinetic_energy;
pub use potential_energy::potential_energy;
pub use temperature::temperature;

/// System-wide energies at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Energies {
    pub kinetic: f64,
    pub potential: f64,
    pub temperature: f64,
}
impl Energies {
    /// Kinetic plus potential. Not conserved, see [`potential_energy`].
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

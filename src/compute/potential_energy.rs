use std::ops::Range;

use crate::{atomic::PairPotential, forces::ForceField};

/// Potential energy attributed to the particles in `owned`.
///
/// Each unordered pair counts once, towards its lower index, so summing the
/// results for disjoint ranges covering the system gives the total. The field
/// adds `g * y` per owned particle.
///
/// The pair term is [`PairPotential::energy`], `4 eps u (1 - u)`, which has
/// the opposite sign to the potential the forces derive from. The total of
/// kinetic and this potential energy is therefore not conserved by the
/// dynamics; it is a monitoring figure only.
pub fn potential_energy(field: &ForceField, positions: &[[f64; 2]], owned: Range<usize>) -> f64 {
    let n = positions.len();
    let mut energy = 0.0;
    for i in owned {
        let xi = positions[i];
        energy += field.field.g * xi[1];
        for xj in &positions[(i + 1)..n] {
            let dx = xj[0] - xi[0];
            let dy = xj[1] - xi[1];
            energy += field.potential.energy(dx * dx + dy * dy);
        }
    }
    energy
}

/// `0.5 * sum |v|^2` over unit-mass particles
pub fn kinetic_energy(velocities: &[[f64; 2]]) -> f64 {
    0.5 * velocities
        .iter()
        .map(|v| v[0] * v[0] + v[1] * v[1])
        .sum::<f64>()
}

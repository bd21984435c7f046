use std::{f64::consts::PI, ops::Range};

use rand::Rng;
use rand_distr::{Open01, Standard};

use crate::region::Region;

/// Placement gives up on a particle after this many rejected candidates
pub const MAX_INIT_TRIALS: usize = 1000;

/// Particle state as parallel arrays, all of the same length.
///
/// Every particle has unit mass, so forces and accelerations coincide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particles {
    pub positions: Vec<[f64; 2]>,
    pub velocities: Vec<[f64; 2]>,
    pub accelerations: Vec<[f64; 2]>,
}
impl Particles {
    pub fn new() -> Self {
        Self::default()
    }
    /// Particles at rest at the given positions
    pub fn from_positions(positions: Vec<[f64; 2]>) -> Self {
        let n = positions.len();
        Self {
            positions,
            velocities: vec![[0.0; 2]; n],
            accelerations: vec![[0.0; 2]; n],
        }
    }
    /// Copy of the particles in `range`, at rest
    pub fn from_slice(positions: &[[f64; 2]], range: Range<usize>) -> Self {
        Self::from_positions(positions[range].to_vec())
    }
    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn positions(&self) -> &[[f64; 2]] {
        &self.positions
    }
    pub fn velocities(&self) -> &[[f64; 2]] {
        &self.velocities
    }
    /// Draw every velocity from a 2D Gaussian with standard deviation `t0`
    /// per axis (Box-Muller: radius `t0 sqrt(-2 ln U1)`, angle `2 pi U2`).
    pub fn set_temperature<R: Rng + ?Sized>(&mut self, t0: f64, rng: &mut R) {
        for v in self.velocities.iter_mut() {
            *v = random_velocity(t0, rng);
        }
    }
}

fn random_velocity<R: Rng + ?Sized>(t0: f64, rng: &mut R) -> [f64; 2] {
    let u1: f64 = rng.sample(Open01);
    let u2: f64 = rng.sample(Standard);
    let r = t0 * (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    [r * theta.cos(), r * theta.sin()]
}

/// Place up to `num_particles` points in `region` by rejection sampling so that
/// no two are closer than `min_dist`.
///
/// Each particle gets at most [`MAX_INIT_TRIALS`] candidates. The first
/// particle that cannot be placed ends the placement, so the returned vector
/// may be shorter than requested.
pub fn init_particles_random<R: Rng + ?Sized>(
    region: &impl Region,
    num_particles: usize,
    min_dist: f64,
    rng: &mut R,
) -> Vec<[f64; 2]> {
    let min_r2 = min_dist * min_dist;
    let mut positions: Vec<[f64; 2]> = Vec::with_capacity(num_particles);

    for _ in 0..num_particles {
        let accepted = (0..MAX_INIT_TRIALS)
            .map(|_| region.random_coord(rng))
            .find(|candidate| {
                positions.iter().all(|p| {
                    let dx = candidate[0] - p[0];
                    let dy = candidate[1] - p[1];
                    dx * dx + dy * dy >= min_r2
                })
            });
        match accepted {
            Some(p) => positions.push(p),
            None => break,
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Rect;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn places_all_when_sparse() {
        let mut rng = StdRng::seed_from_u64(7);
        let sigma = 1e-2;
        let positions = init_particles_random(&Rect::unit(), 200, sigma, &mut rng);
        assert_eq!(positions.len(), 200);
        for (i, p) in positions.iter().enumerate() {
            assert!(Rect::unit().contains(p));
            for q in &positions[..i] {
                let r2 = (p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2);
                assert!(r2 >= sigma * sigma);
            }
        }
    }

    #[test]
    fn stops_early_when_crowded() {
        let mut rng = StdRng::seed_from_u64(3);
        let positions = init_particles_random(&Rect::unit(), 500, 0.9, &mut rng);
        assert!(!positions.is_empty());
        assert!(positions.len() < 500);
    }

    #[test]
    fn velocity_spread_follows_temperature() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut particles = Particles::from_positions(vec![[0.5, 0.5]; 20_000]);
        particles.set_temperature(2.0, &mut rng);
        let n = particles.num_particles() as f64;
        let mean_x = particles.velocities.iter().map(|v| v[0]).sum::<f64>() / n;
        let var_x = particles.velocities.iter().map(|v| v[0] * v[0]).sum::<f64>() / n;
        let var_y = particles.velocities.iter().map(|v| v[1] * v[1]).sum::<f64>() / n;
        assert!(mean_x.abs() < 0.1, "mean {}", mean_x);
        assert!((var_x - 4.0).abs() < 0.3, "var_x {}", var_x);
        assert!((var_y - 4.0).abs() < 0.3, "var_y {}", var_y);
    }

    #[test]
    fn zero_temperature_is_at_rest() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut particles = Particles::from_positions(vec![[0.1, 0.2]; 4]);
        particles.set_temperature(0.0, &mut rng);
        assert!(particles.velocities.iter().all(|v| v[0] == 0.0 && v[1] == 0.0));
    }
}

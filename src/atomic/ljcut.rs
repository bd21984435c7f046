use num_traits::{Float, NumCast};

use super::PairPotential;

/// Cutoff radius in units of sigma, squared (r_c = 2.5 sigma)
pub const CUTOFF_RATIO_SQUARED: f64 = 6.25;

fn lit<F: Float>(x: f64) -> F {
    <F as NumCast>::from(x).unwrap_or_else(F::nan)
}

/// Scalar Lennard-Jones force coefficient.
///
/// V(r) = 4 eps ((sig/r)^12 - (sig/r)^6)
/// C(r) = V'(r) / r = 24 eps / r^2 (sig/r)^6 (1 - 2 (sig/r)^6)
///
/// With r_ij = x_j - x_i the force on i is `C * r_ij`, so C < 0 means
/// repulsion. Zero at and beyond 2.5 sigma.
///
/// ```rust
/// use ljbox::atomic::lj_scalar_force;
///
/// let sig2 = 1e-4_f64;
/// assert_eq!(lj_scalar_force(6.25 * sig2, 1.0, sig2), 0.0);
/// assert!(lj_scalar_force(sig2, 1.0, sig2) < 0.0);
/// ```
pub fn lj_scalar_force<F: Float>(r2: F, eps: F, sig2: F) -> F {
    if r2 >= lit::<F>(CUTOFF_RATIO_SQUARED) * sig2 {
        return F::zero();
    }
    let z = sig2 / r2;
    let u = z * z * z;
    lit::<F>(24.0) * eps / r2 * u * (F::one() - lit::<F>(2.0) * u)
}

/// Pair energy `4 eps u (1 - u)` with `u = (sig/r)^6`, no cutoff.
///
/// This is `-V(r)` for the V of [`lj_scalar_force`]: positive in the well,
/// `+eps` at its minimum.
pub fn lj_potential<F: Float>(r2: F, eps: F, sig2: F) -> F {
    let z = sig2 / r2;
    let u = z * z * z;
    lit::<F>(4.0) * eps * u * (F::one() - u)
}

/// Lennard-Jones 12-6 potential, truncated at 2.5 sigma
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LJCut {
    epsilon: f64,
    sigma2: f64,
    rcut2: f64,
}
impl LJCut {
    pub fn new(epsilon: f64, sigma: f64) -> Self {
        let sigma2 = sigma * sigma;
        Self {
            epsilon,
            sigma2,
            rcut2: CUTOFF_RATIO_SQUARED * sigma2,
        }
    }
}

impl PairPotential for LJCut {
    fn cutoff_squared(&self) -> f64 {
        self.rcut2
    }
    fn scalar_force(&self, r2: f64) -> f64 {
        lj_scalar_force(r2, self.epsilon, self.sigma2)
    }
    fn energy(&self, r2: f64) -> f64 {
        lj_potential(r2, self.epsilon, self.sigma2)
    }
}

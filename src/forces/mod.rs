//! Force fields: a constant external field plus a pair potential summed over
//! every pair in the system.
//!
//! Three decompositions are provided, all giving the same accelerations up to
//! summation order:
//! - [`PairwiseSymmetric`]: every unordered pair once, serial.
//! - [`ThreadedSymmetric`]: every unordered pair once, rows split over a
//!   worker pool with private accumulators.
//! - [`LocalGlobal`]: each owned particle against every other particle, so a
//!   unit only ever writes its own slice (used by distributed ranks).

mod local;
mod symmetric;
mod threaded;

pub use local::LocalGlobal;
pub use symmetric::PairwiseSymmetric;
pub use threaded::ThreadedSymmetric;

use std::ops::Range;

use crate::{
    atomic::{PairPotential, Potential},
    Result,
};

/// Evaluates accelerations for a contiguous range of owned particles
pub trait ForceEvaluator {
    /// Overwrite `out` (one entry per particle in `owned`) with the
    /// accelerations of the owned particles, given every particle's position.
    fn accelerations(
        &self,
        positions: &[[f64; 2]],
        owned: Range<usize>,
        out: &mut [[f64; 2]],
    ) -> Result<()>;

    /// Potential and field this evaluator sums
    fn force_field(&self) -> &ForceField;

    /// Whether `owned` may be a strict subset of the system
    fn supports_partial_ranges(&self) -> bool {
        false
    }
}

/// External field pulling every particle towards -y with strength `g`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExternalField {
    pub g: f64,
}
impl ExternalField {
    pub fn new(g: f64) -> Self {
        Self { g }
    }
    /// Reset every acceleration to the field contribution alone
    pub fn init(&self, out: &mut [[f64; 2]]) {
        out.iter_mut().for_each(|a| *a = [0.0, -self.g]);
    }
}

/// Potential and field shared by every decomposition
#[derive(Clone, Copy, Debug)]
pub struct ForceField {
    pub potential: Potential,
    pub field: ExternalField,
}
impl ForceField {
    pub fn new(potential: Potential, field: ExternalField) -> Self {
        Self { potential, field }
    }
    pub fn from_params(params: &crate::Params) -> Self {
        Self::new(
            Potential::from_params(params),
            ExternalField::new(params.gravity),
        )
    }
}

/// Add `+C r_ij` to i and `-C r_ij` to j for every pair `i < j` with i in `rows`
pub(crate) fn accumulate_pairs(
    potential: &Potential,
    positions: &[[f64; 2]],
    rows: Range<usize>,
    acc: &mut [[f64; 2]],
) {
    let n = positions.len();
    let rc2 = potential.cutoff_squared();
    for i in rows {
        let xi = positions[i];
        for j in (i + 1)..n {
            let dx = positions[j][0] - xi[0];
            let dy = positions[j][1] - xi[1];
            let r2 = dx * dx + dy * dy;
            debug_assert!(r2 > 0.0, "particles {} and {} coincide", i, j);
            if r2 >= rc2 {
                continue;
            }
            let c = potential.scalar_force(r2);
            acc[i][0] += c * dx;
            acc[i][1] += c * dy;
            acc[j][0] -= c * dx;
            acc[j][1] -= c * dy;
        }
    }
}

/// Contribution from every other particle to global particle `i`
pub(crate) fn pull_on(potential: &Potential, positions: &[[f64; 2]], i: usize) -> [f64; 2] {
    let xi = positions[i];
    let rc2 = potential.cutoff_squared();
    let mut acc = [0.0; 2];
    for (j, xj) in positions.iter().enumerate() {
        if i == j {
            continue;
        }
        let dx = xj[0] - xi[0];
        let dy = xj[1] - xi[1];
        let r2 = dx * dx + dy * dy;
        debug_assert!(r2 > 0.0, "particles {} and {} coincide", i, j);
        if r2 >= rc2 {
            continue;
        }
        let c = potential.scalar_force(r2);
        acc[0] += c * dx;
        acc[1] += c * dy;
    }
    acc
}

fn check_whole_system(n: usize, owned: &Range<usize>, out: &[[f64; 2]]) -> Result<()> {
    if owned.start != 0 || owned.end != n {
        return Err(crate::Error::force(format!(
            "symmetric evaluation needs the whole system 0..{}, got {:?}",
            n, owned
        )));
    }
    check_out_len(owned, out)
}

fn check_out_len(owned: &Range<usize>, out: &[[f64; 2]]) -> Result<()> {
    if out.len() != owned.len() {
        return Err(crate::Error::force(format!(
            "output holds {} accelerations for {} owned particles",
            out.len(),
            owned.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::{LJCut, None_};
    use approx::assert_relative_eq;

    #[test]
    fn pair_contributions_cancel() {
        let potential: Potential = LJCut::new(1.0, 1e-2).into();
        let positions = vec![[0.5, 0.5], [0.509, 0.503], [0.495, 0.512], [0.52, 0.49]];
        let mut acc = vec![[0.0; 2]; positions.len()];
        accumulate_pairs(&potential, &positions, 0..positions.len(), &mut acc);

        let total = acc.iter().fold([0.0, 0.0], |s, a| [s[0] + a[0], s[1] + a[1]]);
        let scale = acc.iter().map(|a| a[0].abs() + a[1].abs()).sum::<f64>();
        assert!(scale > 0.0);
        assert!(total[0].abs() <= 1e-12 * scale);
        assert!(total[1].abs() <= 1e-12 * scale);
    }

    #[test]
    fn pull_matches_symmetric_sweep() {
        let potential: Potential = LJCut::new(1.0, 1e-2).into();
        let positions = vec![[0.5, 0.5], [0.509, 0.503], [0.495, 0.512]];
        let mut acc = vec![[0.0; 2]; 3];
        accumulate_pairs(&potential, &positions, 0..3, &mut acc);
        for i in 0..3 {
            let pulled = pull_on(&potential, &positions, i);
            assert_relative_eq!(pulled[0], acc[i][0], max_relative = 1e-10);
            assert_relative_eq!(pulled[1], acc[i][1], max_relative = 1e-10);
        }
    }

    #[test]
    fn pairs_beyond_cutoff_are_skipped() {
        let lj: Potential = LJCut::new(1.0, 1e-2).into();
        let rc = lj.cutoff_squared().sqrt();
        let positions = vec![[0.5, 0.5], [0.5 + 1.01 * rc, 0.5], [0.5, 0.5 + 1.5 * rc]];
        let mut acc = vec![[0.0; 2]; 3];
        accumulate_pairs(&lj, &positions, 0..3, &mut acc);
        assert_eq!(acc, vec![[0.0; 2]; 3]);
        assert_eq!(pull_on(&lj, &positions, 0), [0.0; 2]);

        let none: Potential = None_::new().into();
        let close = vec![[0.5, 0.5], [0.505, 0.5]];
        let mut acc = vec![[0.0; 2]; 2];
        accumulate_pairs(&none, &close, 0..2, &mut acc);
        assert_eq!(acc, vec![[0.0; 2]; 2]);
        assert_eq!(pull_on(&none, &close, 1), [0.0; 2]);
    }
}

use std::ops::Range;

use super::{accumulate_pairs, check_whole_system, ForceEvaluator, ForceField};
use crate::Result;

/// All pairs once, on the calling thread
#[derive(Clone, Copy, Debug)]
pub struct PairwiseSymmetric {
    field: ForceField,
}
impl PairwiseSymmetric {
    pub fn new(field: ForceField) -> Self {
        Self { field }
    }
}

impl ForceEvaluator for PairwiseSymmetric {
    fn accelerations(
        &self,
        positions: &[[f64; 2]],
        owned: Range<usize>,
        out: &mut [[f64; 2]],
    ) -> Result<()> {
        check_whole_system(positions.len(), &owned, out)?;
        self.field.field.init(out);
        accumulate_pairs(&self.field.potential, positions, owned, out);
        Ok(())
    }
    fn force_field(&self) -> &ForceField {
        &self.field
    }
}

use std::{ops::Range, sync::Arc};

use rayon::prelude::*;
use rayon::ThreadPool;

use super::{check_out_len, pull_on, ForceEvaluator, ForceField};
use crate::Result;

/// Owned particles against every particle in the system.
///
/// Every pair is evaluated twice across the system, once from each side, but a
/// unit writes nothing outside its own slice. With a pool, the owned rows are
/// further spread over the pool's workers.
pub struct LocalGlobal {
    field: ForceField,
    pool: Option<Arc<ThreadPool>>,
}
impl LocalGlobal {
    pub fn new(field: ForceField) -> Self {
        Self { field, pool: None }
    }
    pub fn with_pool(field: ForceField, pool: Arc<ThreadPool>) -> Self {
        Self {
            field,
            pool: Some(pool),
        }
    }
}

impl ForceEvaluator for LocalGlobal {
    fn accelerations(
        &self,
        positions: &[[f64; 2]],
        owned: Range<usize>,
        out: &mut [[f64; 2]],
    ) -> Result<()> {
        check_out_len(&owned, out)?;
        let potential = &self.field.potential;
        let g = self.field.field.g;
        let istart = owned.start;
        let row = |(ii, a): (usize, &mut [f64; 2])| {
            let pull = pull_on(potential, positions, istart + ii);
            *a = [pull[0], pull[1] - g];
        };

        match &self.pool {
            Some(pool) => pool.install(|| out.par_iter_mut().enumerate().for_each(row)),
            None => out.iter_mut().enumerate().for_each(row),
        }
        Ok(())
    }

    fn force_field(&self) -> &ForceField {
        &self.field
    }

    fn supports_partial_ranges(&self) -> bool {
        true
    }
}

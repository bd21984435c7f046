use std::{
    ops::Range,
    sync::{Arc, Mutex},
};

use rayon::prelude::*;
use rayon::ThreadPool;

use super::{accumulate_pairs, check_whole_system, ForceEvaluator, ForceField};
use crate::{Error, Partition, Result};

/// All pairs once, with rows split statically over a worker pool.
///
/// Two pairs handled by different workers can touch the same particle, so each
/// worker sums into its own accumulator. Accumulators are merged into the
/// output under one lock per worker per evaluation, never per pair.
pub struct ThreadedSymmetric {
    field: ForceField,
    pool: Arc<ThreadPool>,
    accumulators: Vec<Mutex<Vec<[f64; 2]>>>,
}
impl ThreadedSymmetric {
    pub fn new(field: ForceField, pool: Arc<ThreadPool>) -> Self {
        let num_workers = pool.current_num_threads();
        let accumulators = (0..num_workers).map(|_| Mutex::new(Vec::new())).collect();
        Self {
            field,
            pool,
            accumulators,
        }
    }
    pub fn num_workers(&self) -> usize {
        self.accumulators.len()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::force("a force worker panicked while holding a lock")
}

impl ForceEvaluator for ThreadedSymmetric {
    fn accelerations(
        &self,
        positions: &[[f64; 2]],
        owned: Range<usize>,
        out: &mut [[f64; 2]],
    ) -> Result<()> {
        let n = positions.len();
        check_whole_system(n, &owned, out)?;
        self.field.field.init(out);

        let rows = Partition::new(n, self.num_workers());
        let total = Mutex::new(out);
        let potential = &self.field.potential;

        self.pool.install(|| {
            self.accumulators
                .par_iter()
                .enumerate()
                .try_for_each(|(worker, accumulator)| -> Result<()> {
                    let mut acc = accumulator.lock().map_err(poisoned)?;
                    // keeps its capacity, so only the first evaluation allocates
                    acc.clear();
                    acc.resize(n, [0.0; 2]);
                    accumulate_pairs(potential, positions, rows.range(worker), &mut acc);

                    let mut total = total.lock().map_err(poisoned)?;
                    for (t, a) in total.iter_mut().zip(acc.iter()) {
                        t[0] += a[0];
                        t[1] += a[1];
                    }
                    Ok(())
                })
        })
    }
    fn force_field(&self) -> &ForceField {
        &self.field
    }
}

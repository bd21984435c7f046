//! Collective operations between the units of a run.

use crate::{Partition, Result};

/// Collectives every unit of a run calls in the same order.
///
/// All of them block until the whole group has taken part.
pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;

    fn is_root(&self) -> bool {
        self.rank() == 0
    }

    /// Root's `count` everywhere
    fn broadcast_count(&self, count: usize) -> Result<usize>;

    /// Replace `positions` on every non-root unit with the root's
    fn broadcast_positions(&self, positions: &mut Vec<[f64; 2]>) -> Result<()>;

    /// Publish this unit's `local` slice and collect every other unit's into
    /// `global`, laid out by `partition`
    fn all_gather(
        &self,
        local: &[[f64; 2]],
        partition: &Partition,
        global: &mut [[f64; 2]],
    ) -> Result<()>;

    /// Sum of `value` over all units, identical on every unit
    fn all_reduce_sum(&self, value: f64) -> Result<f64>;
}

/// The only unit of a run, nothing to exchange
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn broadcast_count(&self, count: usize) -> Result<usize> {
        Ok(count)
    }
    fn broadcast_positions(&self, _positions: &mut Vec<[f64; 2]>) -> Result<()> {
        Ok(())
    }
    fn all_gather(
        &self,
        local: &[[f64; 2]],
        partition: &Partition,
        global: &mut [[f64; 2]],
    ) -> Result<()> {
        global[partition.range(0)].copy_from_slice(local);
        Ok(())
    }
    fn all_reduce_sum(&self, value: f64) -> Result<f64> {
        Ok(value)
    }
}

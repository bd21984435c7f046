//! Splitting particles (not space) across execution units.

use std::ops::Range;

/// Contiguous near-equal shares of `n` particles over `p` units.
///
/// Every unit gets `n / p` particles and the first `n % p` units one more.
/// Built redundantly by every unit from the same `(n, p)`, so all of them
/// agree on the layout without communicating it.
///
/// ```rust
/// use ljbox::Partition;
///
/// let partition = Partition::new(10, 3);
/// assert_eq!(partition.counts(), &[4, 3, 3]);
/// assert_eq!(partition.offsets(), &[0, 4, 7, 10]);
/// assert_eq!(partition.range(1), 4..7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    offsets: Vec<usize>,
    counts: Vec<usize>,
}
impl Partition {
    pub fn new(n: usize, num_units: usize) -> Self {
        assert!(num_units > 0, "Number of units should be positive");
        let num_each = n / num_units;
        let num_left = n % num_units;

        let mut offsets = Vec::with_capacity(num_units + 1);
        let mut counts = Vec::with_capacity(num_units);
        offsets.push(0);
        for i in 0..num_units {
            let count = num_each + usize::from(i < num_left);
            counts.push(count);
            offsets.push(offsets[i] + count);
        }
        Self { offsets, counts }
    }
    pub fn num_units(&self) -> usize {
        self.counts.len()
    }
    pub fn num_particles(&self) -> usize {
        self.offsets[self.counts.len()]
    }
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
    /// Global index range owned by `unit`
    pub fn range(&self, unit: usize) -> Range<usize> {
        self.offsets[unit]..self.offsets[unit + 1]
    }
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.num_units()).map(|i| self.range(i))
    }
    /// Split `slice` (laid out like the whole system) into one mutable chunk per unit
    pub fn split_mut<'a, T>(&self, mut slice: &'a mut [T]) -> Vec<&'a mut [T]> {
        assert_eq!(
            slice.len(),
            self.num_particles(),
            "Slice should cover every particle of the partition"
        );
        let mut chunks = Vec::with_capacity(self.num_units());
        for &count in &self.counts {
            let (head, tail) = std::mem::take(&mut slice).split_at_mut(count);
            chunks.push(head);
            slice = tail;
        }
        chunks
    }
}

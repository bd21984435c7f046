pub mod rect;
pub use rect::Rect;

use rand::Rng;

pub trait Region {
    fn contains(&self, coord: &[f64; 2]) -> bool;
    /// A point drawn uniformly from the region
    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2];
}

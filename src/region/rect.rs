use rand::Rng;

use super::Region;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    xlo: f64,
    xhi: f64,
    ylo: f64,
    yhi: f64,
}
impl Rect {
    pub fn new(xlo: f64, xhi: f64, ylo: f64, yhi: f64) -> Self {
        assert!(
            xlo < xhi && ylo < yhi,
            "Lower bounds should be less than upper bounds, found x: [{}, {}], y: [{}, {}]",
            xlo,
            xhi,
            ylo,
            yhi,
        );
        Self { xlo, xhi, ylo, yhi }
    }
    /// The unit square `[0, 1] x [0, 1]`
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
    pub fn lx(&self) -> f64 {
        self.xhi - self.xlo
    }
    pub fn ly(&self) -> f64 {
        self.yhi - self.ylo
    }
    /// Lower and upper bound along axis 0 (x) or 1 (y)
    pub fn bounds(&self, axis: usize) -> [f64; 2] {
        match axis {
            0 => [self.xlo, self.xhi],
            _ => [self.ylo, self.yhi],
        }
    }
}
impl Region for Rect {
    fn contains(&self, coord: &[f64; 2]) -> bool {
        self.xlo <= coord[0] && coord[0] <= self.xhi && self.ylo <= coord[1] && coord[1] <= self.yhi
    }
    fn random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2] {
        [
            rng.gen::<f64>() * self.lx() + self.xlo,
            rng.gen::<f64>() * self.ly() + self.ylo,
        ]
    }
}

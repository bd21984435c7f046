use super::PairPotential;

/// No pair interaction at all, only the external field acts
#[derive(Clone, Copy, Debug, Default)]
pub struct None_ {}
impl None_ {
    pub fn new() -> Self {
        Self {}
    }
}
impl PairPotential for None_ {
    fn cutoff_squared(&self) -> f64 {
        0.0
    }
    fn scalar_force(&self, _r2: f64) -> f64 {
        0.0
    }
    fn energy(&self, _r2: f64) -> f64 {
        0.0
    }
}

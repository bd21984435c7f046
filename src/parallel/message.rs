use std::sync::Arc;

/// Message between ranks
#[derive(Debug)]
pub enum Message {
    /// Particle count decided by the root
    Count(usize),
    /// Every particle position, from the root
    Positions(Vec<[f64; 2]>),
    /// Positions of the particles the sender owns, one buffer shared by
    /// every receiver
    Slice(Arc<[[f64; 2]]>),
    /// One term of a reduction
    Scalar(f64),
}
impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Count(_) => "count",
            Message::Positions(_) => "positions",
            Message::Slice(_) => "slice",
            Message::Scalar(_) => "scalar",
        }
    }
}

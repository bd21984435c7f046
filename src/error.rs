use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Placement could not put down a single particle
    #[error("No particles could be placed")]
    NoParticles,

    /// A peer rank went away or sent something unexpected
    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Rank {0} panicked")]
    RankPanicked(usize),

    #[error("Force evaluation error: {0}")]
    Force(String),

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn comm(msg: impl Into<String>) -> Self {
        Self::Communication(msg.into())
    }

    pub fn force(msg: impl Into<String>) -> Self {
        Self::Force(msg.into())
    }

    /// Whether this error is only a consequence of another rank failing
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication(_))
    }
}

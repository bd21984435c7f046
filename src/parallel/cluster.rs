use std::thread;

use tracing::error;

use super::Domain;
use crate::{Error, Result};

/// Runs one function on every rank of a group of connected threads
#[derive(Clone, Copy, Debug)]
pub struct Cluster {
    size: usize,
}
impl Cluster {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::config("number of ranks should be positive"));
        }
        Ok(Self { size })
    }
    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `f` once per rank and collect the results in rank order.
    ///
    /// A rank that fails drops its channels, which makes every rank waiting on
    /// it fail in turn. The error reported is the first one that is not just
    /// such a consequence.
    pub fn run<T, F>(&self, f: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(Domain) -> Result<T> + Sync,
    {
        let f = &f;
        thread::scope(|s| {
            let handles = Domain::connect(self.size)
                .into_iter()
                .enumerate()
                .map(|(rank, domain)| {
                    thread::Builder::new()
                        .name(format!("rank-{}", rank))
                        .spawn_scoped(s, move || f(domain))
                })
                .collect::<std::io::Result<Vec<_>>>()?;

            let mut results = Vec::with_capacity(self.size);
            let mut errors = Vec::new();
            for (rank, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(Ok(value)) => results.push(value),
                    Ok(Err(e)) => {
                        error!(rank, "rank failed: {}", e);
                        errors.push(e);
                    }
                    Err(_) => errors.push(Error::RankPanicked(rank)),
                }
            }

            match root_cause(errors) {
                Some(e) => Err(e),
                None => Ok(results),
            }
        })
    }
}

fn root_cause(mut errors: Vec<Error>) -> Option<Error> {
    match errors.iter().position(|e| !e.is_communication()) {
        Some(i) => Some(errors.swap_remove(i)),
        None => errors.into_iter().next(),
    }
}

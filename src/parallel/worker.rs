use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{Error, Result};

/// Fixed-size worker pool, built once per run and reused for every step
pub fn build_pool(num_threads: usize, label: &str) -> Result<Arc<ThreadPool>> {
    if num_threads == 0 {
        return Err(Error::config("number of threads should be positive"));
    }
    let label = label.to_owned();
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(move |i| format!("{}-worker-{}", label, i))
        .build()?;
    Ok(Arc::new(pool))
}

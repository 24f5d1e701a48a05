//! Rayon thread pool configuration for batch simulation.
//!
//! Use [`WorkerPool::install`] to run a batch with a fixed number of threads,
//! or rely on Rayon's default (all CPU cores).

use anyhow::{Context, Result};
use rayon::ThreadPoolBuilder;

/// Configures how many worker threads run battles in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads (0 = all cores).
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Runs `f` on a pool with this worker count. With `workers == 0` the
    /// global Rayon pool is used; otherwise a temporary pool is built.
    pub fn install<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return Ok(f());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .context("failed to build worker pool")?;
        Ok(pool.install(f))
    }
}

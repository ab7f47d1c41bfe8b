//! Thread-pool configuration for the orchestrator's parallel stages.

use mtb_core::{BuildError, Result};

/// The only concurrency knob exposed to callers (§5, §9): a bounded
/// thread count. `0` defers to rayon's default (one worker per core).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThreadPoolConfig {
    pub thread_count: usize,
}

impl ThreadPoolConfig {
    pub fn build(self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if self.thread_count > 0 {
            builder = builder.num_threads(self.thread_count);
        }
        builder
            .build()
            .map_err(|err| BuildError::invalid_argument(format!("failed to start worker pool: {err}")))
    }
}

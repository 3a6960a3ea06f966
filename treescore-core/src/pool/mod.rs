//! A fixed pool of workers for static fan-out/fan-in.
//!
//! Each call partitions an index range into contiguous shards, runs one task per
//! shard on the pool, blocks until every task completes, and hands the results back
//! in shard order.  Every call owns its own result slots, so concurrent calls may
//! interleave on the pool freely.
use std::ops::Range;
use std::sync::RwLock;

use log::{info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::EvalError;

/// Number of workers to use when none is configured.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Splits `0..len` into `shards` contiguous, non-overlapping ranges covering every
/// index exactly once.  Earlier shards take the remainder, so shard sizes differ by at
/// most one.  Some shards are empty when `len < shards`.
pub fn partition(len: usize, shards: usize) -> Vec<Range<usize>> {
    let shards = shards.max(1);
    let base = len / shards;
    let extra = len % shards;
    let mut start = 0;
    (0..shards)
        .map(|i| {
            let size = base + if i < extra { 1 } else { 0 };
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Fixed-size set of worker threads, created once and reused for every call until
/// shutdown.
pub struct WorkerPool {
    workers: usize,

    /// `None` once shut down.  Calls hold the read lock while running, so shutdown
    /// waits for in-flight work.
    pool: RwLock<Option<ThreadPool>>,
}

impl WorkerPool {
    /// Creates a pool with `workers` threads, or one per available core when `None`.
    pub fn new(workers: Option<usize>) -> Result<Self, EvalError> {
        let workers = match workers {
            Some(n) if n > 0 => n,
            _ => default_workers(),
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("treescore-worker-{}", i))
            .build()?;
        info!("Started worker pool with {} workers", workers);
        Ok(WorkerPool {
            workers: workers,
            pool: RwLock::new(Some(pool)),
        })
    }

    /// Number of workers, which is also the shard count for a call.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Partitions `0..len` into one shard per worker.
    pub fn shards(&self, len: usize) -> Vec<Range<usize>> {
        partition(len, self.workers)
    }

    /// Runs `task` once per shard on the pool and blocks until all of them finish.
    ///
    /// The returned vector is indexed by shard, regardless of the order in which the
    /// workers completed.
    pub fn fan_out<T, F>(&self, shards: &[Range<usize>], task: F) -> Result<Vec<T>, EvalError>
    where
        T: Send,
        F: Fn(Range<usize>) -> T + Sync,
    {
        let guard = self.pool.read().map_err(|_| EvalError::PoolPoisoned)?;
        let pool = match guard.as_ref() {
            Some(pool) => pool,
            None => {
                warn!("Worker pool used after shutdown");
                return Err(EvalError::PoolShutDown);
            }
        };

        let mut slots: Vec<Option<T>> = shards.iter().map(|_| None).collect();
        let task = &task;
        pool.scope(|s| {
            for (slot, range) in slots.iter_mut().zip(shards.iter()) {
                let range = range.clone();
                s.spawn(move |_| *slot = Some(task(range)));
            }
        });

        slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.ok_or(EvalError::WorkerLost(i)))
            .collect()
    }

    /// Releases every worker.  Waits for in-flight calls to finish first; subsequent
    /// calls fail with [`EvalError::PoolShutDown`].  Calling it twice is harmless.
    pub fn shutdown(&self) -> Result<(), EvalError> {
        let mut guard = self.pool.write().map_err(|_| EvalError::PoolPoisoned)?;
        if guard.take().is_some() {
            info!("Shut down worker pool with {} workers", self.workers);
        }
        Ok(())
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        match self.pool.read() {
            Ok(guard) => guard.is_none(),
            Err(_) => true,
        }
    }
}

use rayon::ThreadPoolBuildError;

/// Failure of a single evaluate call.
///
/// These are scoped to the evaluator instance that raised them and are never retried
/// internally.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The worker pool was released by an explicit shutdown.
    #[error("worker pool has been shut down")]
    PoolShutDown,

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] ThreadPoolBuildError),

    /// A caller panicked while holding the pool lock.
    #[error("worker pool lock poisoned")]
    PoolPoisoned,

    /// A shard finished without producing a result.
    #[error("shard {0} produced no result")]
    WorkerLost(usize),
}

//! Treescore-Core
//! ===
//!
//! Shared interfaces for scoring payloads against immutable models.
//!
//! Evaluators
//! ---
//! Every scoring strategy implements [`model::Evaluator`]: it is bound to one model at
//! construction and is then read-only, so a single instance can be shared across
//! threads and called repeatedly.
//!
//! Worker pool
//! ---
//! [`pool::WorkerPool`] is a fixed set of workers created once and reused for every
//! call.  Work is statically partitioned into contiguous shards and results come back
//! in shard order, never completion order, which keeps floating point reductions
//! deterministic for a fixed worker count.

#![warn(missing_docs, unused)]

/// Errors raised while evaluating a payload.
pub mod error;

/// Defines the interfaces for scoring models.
pub mod model;

/// Fixed-size worker pool with sharded fan-out/fan-in.
pub mod pool;

//! perfscope execution engine
//!
//! This crate runs probes against the target's chat endpoint: single probes
//! through [`ProbeExecutor`], fan-out load tests through [`LoadCoordinator`]
//! on a bounded [`WorkerPool`], and sequential scenario benchmarks.

pub mod benchmark;
pub mod error;
pub mod load;
pub mod pool;
pub mod probe;

// Re-export main types
pub use benchmark::{BenchmarkReport, BenchmarkSummary, ScenarioBenchmark, ScenarioResult};
pub use error::{ExecutionError, ExecutionResult};
pub use load::LoadCoordinator;
pub use pool::WorkerPool;
pub use probe::ProbeExecutor;

//! Performance testing service for perfscope
//!
//! [`PerformanceService`] wires the HTTP client, telemetry extractor, shared
//! result store, executors and analysers together from a [`PerfscopeConfig`]
//! and exposes one method per externally callable operation. Callers pass
//! typed request structs which are validated before anything runs.
//!
//! [`PerfscopeConfig`]: perfscope_config::PerfscopeConfig

pub mod error;
pub mod requests;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use requests::{
    AnalyzeRequest, BenchmarkRequest, CompareRequest, MonitorCostsRequest, RunLoadRequest,
    RunProbeRequest,
};
pub use service::PerformanceService;

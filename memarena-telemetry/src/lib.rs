//! # memarena telemetry
//!
//! Logging setup and Prometheus metrics for arena usage.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;

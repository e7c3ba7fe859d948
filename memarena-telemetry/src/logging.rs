//! ## memarena-telemetry::logging
//! **Structured logging with `tracing`**
//!
//! `RUST_LOG` takes precedence; the configured level is the fallback.

use memarena_core::alloc::ArenaStats;
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

pub type InitError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Fails if one is already installed.
    pub fn init(default_level: &str) -> Result<(), InitError> {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .try_init()
    }

    /// Emits one structured usage record for an arena.
    #[inline]
    pub fn log_usage(
        phase: &str,
        arena_id: u64,
        usage: usize,
        capacity: usize,
        stats: &ArenaStats,
    ) {
        info!(
            phase,
            arena_id,
            usage,
            capacity,
            allocations = stats.allocations(),
            failed_allocations = stats.failed_allocations(),
            resets = stats.resets(),
            high_water_mark = stats.high_water_mark(),
            "arena usage"
        );
    }
}

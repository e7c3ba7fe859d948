//! ## memarena-telemetry::metrics
//! **Prometheus exporter for arena usage**
//!
//! A recorder mirrors one arena: counters follow the arena's cumulative
//! [`ArenaStats`], gauges follow its current usage.

use memarena_core::alloc::ArenaStats;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub allocations: IntCounter,
    pub failed_allocations: IntCounter,
    pub resets: IntCounter,
    pub usage: IntGauge,
    pub capacity: IntGauge,
    pub high_water_mark: IntGauge,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let allocations = IntCounter::new(
            "memarena_allocations_total",
            "Successful arena slot allocations",
        )?;
        let failed_allocations = IntCounter::new(
            "memarena_failed_allocations_total",
            "Allocations rejected because the arena was full",
        )?;
        let resets = IntCounter::new("memarena_resets_total", "Whole-arena resets")?;
        let usage = IntGauge::new("memarena_usage_slots", "Slots currently in use")?;
        let capacity = IntGauge::new("memarena_capacity_slots", "Total arena slots")?;
        let high_water_mark = IntGauge::new(
            "memarena_high_water_slots",
            "Peak number of slots in use",
        )?;

        registry.register(Box::new(allocations.clone()))?;
        registry.register(Box::new(failed_allocations.clone()))?;
        registry.register(Box::new(resets.clone()))?;
        registry.register(Box::new(usage.clone()))?;
        registry.register(Box::new(capacity.clone()))?;
        registry.register(Box::new(high_water_mark.clone()))?;

        Ok(Self {
            registry,
            allocations,
            failed_allocations,
            resets,
            usage,
            capacity,
            high_water_mark,
        })
    }

    /// Brings every metric up to date with a snapshot of the arena.
    pub fn observe(&self, usage: usize, capacity: usize, stats: &ArenaStats) {
        advance(&self.allocations, stats.allocations());
        advance(&self.failed_allocations, stats.failed_allocations());
        advance(&self.resets, stats.resets());
        self.usage.set(gauge_value(usage));
        self.capacity.set(gauge_value(capacity));
        self.high_water_mark.set(gauge_value(stats.high_water_mark()));
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

// Counters only move forward; snapshots are cumulative.
fn advance(counter: &IntCounter, total: u64) {
    counter.inc_by(total.saturating_sub(counter.get()));
}

fn gauge_value(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

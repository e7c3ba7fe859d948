//! ## memarena-core::alloc::stats
//! **Per-arena allocation statistics**
//!
//! Counters are owned by the arena they describe and updated through
//! `&mut self`, matching the arena's single-writer model. Callers that want a
//! process-wide view pass snapshots to the telemetry layer explicitly.

/// Allocation counters for one arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    allocations: u64,
    failed_allocations: u64,
    resets: u64,
    high_water_mark: usize,
}

impl ArenaStats {
    /// Creates a new `ArenaStats` instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful allocation that left `usage` slots in use.
    #[inline]
    pub(crate) fn record_allocation(&mut self, usage: usize) {
        self.allocations += 1;
        self.high_water_mark = self.high_water_mark.max(usage);
    }

    #[inline]
    pub(crate) fn record_failed_allocation(&mut self) {
        self.failed_allocations += 1;
    }

    #[inline]
    pub(crate) fn record_reset(&mut self) {
        self.resets += 1;
    }

    /// Successful allocations since construction, across resets.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Allocations rejected with `CapacityExceeded`.
    pub fn failed_allocations(&self) -> u64 {
        self.failed_allocations
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Highest number of slots simultaneously in use.
    pub fn high_water_mark(&self) -> usize {
        self.high_water_mark
    }
}

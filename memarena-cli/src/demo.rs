//! The arena walkthrough: fill, overflow, reset, reuse.

use std::fmt;

use memarena_config::MemarenaConfig;
use memarena_core::alloc::ArenaStats;
use memarena_core::view::{fixed_str, write_fixed_str, StrView};
use memarena_core::{Arena, ArenaError, Handle, ViewError};
use memarena_telemetry::logging::EventLogger;
use memarena_telemetry::metrics::MetricsRecorder;

/// Fixed-size record; the name lives inline so records own no heap memory.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Record {
    pub id: u64,
    pub name: [u8; 16],
    pub value: f64,
}

impl Record {
    /// Overwrites every field. Slots come back from the arena with stale data.
    pub fn fill(&mut self, id: u64, name: &str, value: f64) {
        self.id = id;
        write_fixed_str(&mut self.name, name);
        self.value = value;
    }

    pub fn name(&self) -> Result<StrView<'_>, ViewError> {
        fixed_str(&self.name)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Ok(name) => write!(f, "ID: {}, Name: {}, Value: {:.2}", self.id, name, self.value),
            Err(_) => write!(f, "ID: {}, Name: <invalid>, Value: {:.2}", self.id, self.value),
        }
    }
}

/// What the walkthrough observed.
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub element_size: usize,
    /// Slot addresses of every successful allocation before the reset.
    pub fill_addresses: Vec<usize>,
    /// Error returned by the allocation past capacity.
    pub overflow: Option<ArenaError>,
    pub usage_after_fill: usize,
    pub usage_after_reset: usize,
    pub post_reset_addresses: Vec<usize>,
    pub usage_final: usize,
    pub stats: ArenaStats,
}

impl DemoReport {
    /// The first allocation after the reset landed where the very first
    /// allocation did.
    pub fn storage_reused(&self) -> bool {
        matches!(
            (self.fill_addresses.first(), self.post_reset_addresses.first()),
            (Some(before), Some(after)) if before == after
        )
    }

    /// Consecutive fill allocations are exactly one slot apart.
    pub fn fill_is_sequential(&self) -> bool {
        self.fill_addresses
            .windows(2)
            .all(|pair| pair[1] == pair[0] + self.element_size)
    }
}

/// Runs the walkthrough against an `Arena<Record>` sized from `config`.
pub fn run_demo(
    config: &MemarenaConfig,
    metrics: Option<&MetricsRecorder>,
) -> Result<DemoReport, ArenaError> {
    let capacity = config.arena.capacity;
    let demo = &config.demo;

    let mut arena = Arena::<Record>::new(capacity)?;
    println!("Arena created with capacity: {}", arena.capacity());

    let observe = |phase: &str, arena: &Arena<Record>| {
        EventLogger::log_usage(
            phase,
            arena.id(),
            arena.current_usage(),
            arena.capacity(),
            arena.stats(),
        );
        if let Some(metrics) = metrics {
            metrics.observe(arena.current_usage(), arena.capacity(), arena.stats());
        }
    };

    println!("\nAllocating {} records:", demo.first_batch);
    let mut fill_addresses = Vec::with_capacity(capacity);
    for i in 0..demo.first_batch {
        let handle = arena.alloc()?;
        arena[handle].fill(100 + i as u64, &format!("Item-{i}"), i as f64 * 1.5);
        fill_addresses.push(print_slot(&arena, handle));
    }
    println!(
        "\nCurrent arena usage: {}/{}",
        arena.current_usage(),
        arena.capacity()
    );

    println!("\nAllocating up to {} records:", capacity + 1);
    let mut overflow = None;
    for i in demo.first_batch..=capacity {
        match arena.alloc() {
            Ok(handle) => {
                arena[handle].fill(100 + i as u64, &format!("Item-{i}"), i as f64 * 1.5);
                fill_addresses.push(print_slot(&arena, handle));
            }
            Err(err) => {
                println!("  Error allocating item {i}: {err}");
                overflow = Some(err);
                break;
            }
        }
    }
    let usage_after_fill = arena.current_usage();
    println!(
        "Current arena usage after exceeding capacity attempt: {}/{}",
        usage_after_fill,
        arena.capacity()
    );
    observe("fill", &arena);

    println!("\nResetting the arena...");
    arena.reset();
    let usage_after_reset = arena.current_usage();
    println!(
        "Current arena usage after reset: {}/{}",
        usage_after_reset,
        arena.capacity()
    );

    println!("\nAllocating {} records after reset:", demo.post_reset_batch);
    let mut post_reset_addresses = Vec::with_capacity(demo.post_reset_batch);
    for i in 0..demo.post_reset_batch {
        let handle = arena.alloc()?;
        arena[handle].fill(200 + i as u64, &format!("ResetItem-{i}"), i as f64 * 2.0);
        post_reset_addresses.push(print_slot(&arena, handle));
    }
    let usage_final = arena.current_usage();
    println!(
        "Current arena usage: {}/{}",
        usage_final,
        arena.capacity()
    );
    observe("reuse", &arena);

    Ok(DemoReport {
        element_size: arena.element_size(),
        fill_addresses,
        overflow,
        usage_after_fill,
        usage_after_reset,
        post_reset_addresses,
        usage_final,
        stats: *arena.stats(),
    })
}

fn print_slot(arena: &Arena<Record>, handle: Handle<Record>) -> usize {
    let addr = arena.slot_ptr(handle).map_or(0, |ptr| ptr as usize);
    println!("  Allocated: {} (Address: {:#x})", arena[handle], addr);
    addr
}

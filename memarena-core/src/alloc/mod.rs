//! ## memarena-core::alloc
//! **Fixed-capacity typed arena with bump allocation**
//!
//! ### Key Submodules:
//! - `arena/`: the [`Arena`] itself (alloc, reset, validate, introspection)
//! - `block/`: owned slot storage and slot layout
//! - `handle/`: index handles issued by an arena
//! - `stats/`: per-arena allocation counters

pub mod arena;
pub mod block;
pub mod handle;
pub mod stats;

pub use arena::Arena;
pub use block::SlotLayout;
pub use handle::Handle;
pub use stats::ArenaStats;

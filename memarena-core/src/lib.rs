//! # memarena-core
//!
//! Fixed-capacity typed arenas with bump allocation, and zero-copy views
//! between bytes and text.
//!
//! ### Expectations:
//! - O(1) allocation and O(1) whole-arena reset
//! - No per-element heap allocation after construction
//! - Single writer: mutation goes through `&mut`, callers lock if they share
//!
//! ### Key Submodules:
//! - `alloc`: [`Arena`], its handles, storage block and statistics
//! - `view`: checked byte/text reinterpretation without copies
//!
//! ```
//! use memarena_core::prelude::*;
//!
//! let mut arena = Arena::<u64>::new(2)?;
//! let slot = arena.alloc()?;
//! arena[slot] = 7;
//! assert_eq!(arena.current_usage(), 1);
//! arena.reset();
//! assert_eq!(arena.current_usage(), 0);
//! # Ok::<(), ArenaError>(())
//! ```

pub mod alloc;
pub mod error;
pub mod view;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::error::*;
    pub use crate::view::*;
}

pub use alloc::{Arena, Handle};
pub use error::{ArenaError, ViewError};

//! ## memarena-core::alloc::handle
//! **Index handles into an arena**

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Non-owning reference to one slot of an [`Arena`](super::Arena).
///
/// A handle pairs the issuing arena's identity with a slot index. It stays
/// memory safe forever, but is only *logically* valid while the arena is
/// alive and until its next [`reset`](super::Arena::reset); after that the
/// slot may hold a different element. Handles are not tracked, so the arena
/// cannot detect a stale one.
pub struct Handle<T> {
    arena_id: u64,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    #[inline]
    pub(crate) fn new(arena_id: u64, index: usize) -> Self {
        Self {
            arena_id,
            index,
            _marker: PhantomData,
        }
    }

    /// Slot index within the issuing arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Identity of the arena that issued this handle.
    #[inline]
    pub fn arena_id(&self) -> u64 {
        self.arena_id
    }
}

// Manual impls: derives would require `T: Clone`, `T: PartialEq`, ...
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.arena_id == other.arena_id && self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.arena_id.hash(state);
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("arena_id", &self.arena_id)
            .field("index", &self.index)
            .finish()
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(arena={}, slot={})", self.arena_id, self.index)
    }
}

//! ## memarena-core::alloc::arena
//! **Fixed-capacity typed bump arena**
//!
//! An [`Arena`] owns one block of `capacity` slots and hands them out in order
//! by advancing an offset. There is no free list: the only way to reclaim
//! memory is [`Arena::reset`], which rewinds the offset in O(1) and leaves the
//! slot contents untouched.
//!
//! The arena does no internal synchronization. Allocation and reset take
//! `&mut self`; share an arena across threads by wrapping it in a lock.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use super::block::{RawBlock, SlotLayout};
use super::handle::Handle;
use super::stats::ArenaStats;
use crate::error::ArenaError;

static NEXT_ARENA_ID: AtomicU64 = AtomicU64::new(1);

/// Fixed-capacity arena of `T` slots with bump allocation.
///
/// Every slot always holds a valid `T`: the block is filled with
/// `T::default()` on construction, and afterwards a slot keeps whatever its
/// last user wrote. A freshly allocated slot therefore holds *stale* data
/// that callers must overwrite before relying on it.
pub struct Arena<T> {
    id: u64,
    block: RawBlock<T>,
    offset: usize,
    layout: SlotLayout,
    stats: ArenaStats,
}

impl<T: Default> Arena<T> {
    /// Creates an arena holding up to `capacity` elements.
    ///
    /// # Errors
    ///
    /// * [`ArenaError::InvalidCapacity`] if `capacity` is zero.
    /// * [`ArenaError::StorageTooLarge`] if the block cannot be allocated.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::InvalidCapacity {
                requested: capacity,
            });
        }

        let block = RawBlock::new(capacity)?;
        let layout = SlotLayout::of::<T>();
        let id = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);

        debug!(
            arena_id = id,
            element = std::any::type_name::<T>(),
            capacity,
            element_size = layout.size(),
            element_align = layout.align(),
            byte_len = block.byte_len(),
            base = format_args!("{:#x}", block.base_addr()),
            "arena initialized"
        );

        Ok(Self {
            id,
            block,
            offset: 0,
            layout,
            stats: ArenaStats::new(),
        })
    }
}

impl<T> Arena<T> {
    /// Claims the next slot.
    ///
    /// The k-th allocation after construction or [`reset`](Self::reset) is
    /// slot `k - 1`, at `base_addr() + (k - 1) * element_size()`. The slot
    /// content is whatever was last stored there and is never cleared.
    ///
    /// # Errors
    ///
    /// [`ArenaError::CapacityExceeded`] when every slot is in use. The arena
    /// is left unchanged and stays usable after a `reset`.
    #[inline]
    pub fn alloc(&mut self) -> Result<Handle<T>, ArenaError> {
        if self.offset >= self.capacity() {
            self.stats.record_failed_allocation();
            warn!(
                arena_id = self.id,
                capacity = self.capacity(),
                "arena capacity exceeded"
            );
            return Err(ArenaError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        let index = self.offset;
        self.offset += 1;
        self.stats.record_allocation(self.offset);
        trace!(arena_id = self.id, slot = index, "slot allocated");

        Ok(Handle::new(self.id, index))
    }

    /// Claims the next slot and stores `value` in it.
    pub fn alloc_with(&mut self, value: T) -> Result<Handle<T>, ArenaError> {
        let handle = self.alloc()?;
        if let Some(slot) = self.block.slot_mut(handle.index()) {
            *slot = value;
        }
        Ok(handle)
    }

    /// Makes every slot available again.
    ///
    /// O(1): only the offset is rewound. Slot contents are kept and will be
    /// seen by the next allocations. Handles issued before the reset are not
    /// invalidated proactively; using one after its slot is reallocated
    /// yields the new occupant.
    pub fn reset(&mut self) {
        let reclaimed = self.offset;
        self.offset = 0;
        self.stats.record_reset();
        debug!(
            arena_id = self.id,
            reclaimed,
            capacity = self.capacity(),
            "arena reset"
        );
    }

    /// Number of slots handed out since construction or the last reset.
    #[inline]
    pub fn current_usage(&self) -> usize {
        self.offset
    }

    /// Maximum number of slots. Never changes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.block.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.offset
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.offset == self.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Checks that `handle` was issued by this arena and names a slot inside
    /// the block.
    ///
    /// A slot's address is `base_addr() + index * element_size()`, so this is
    /// the same as checking that the address lies in the block on a slot
    /// boundary. It does **not** check that the slot is in the active range
    /// `[0, current_usage())`, nor that the handle predates the last reset.
    /// Use it as a debugging aid, not as a safety barrier.
    #[inline]
    pub fn validate(&self, handle: Handle<T>) -> bool {
        handle.arena_id() == self.id && handle.index() < self.capacity()
    }

    /// Address-level form of [`validate`](Self::validate) for raw pointers.
    ///
    /// True iff `ptr` lies in `[base, base + capacity * element_size)` at a
    /// multiple of `element_size` from the base. The pointer is never
    /// dereferenced.
    pub fn contains_ptr(&self, ptr: *const T) -> bool {
        self.block.index_of_addr(ptr as usize).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if !self.validate(handle) {
            return None;
        }
        self.block.slot(handle.index())
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if !self.validate(handle) {
            return None;
        }
        self.block.slot_mut(handle.index())
    }

    /// Address of the slot behind `handle`.
    pub fn slot_ptr(&self, handle: Handle<T>) -> Option<*const T> {
        if !self.validate(handle) {
            return None;
        }
        self.block.slot_ptr(handle.index())
    }

    /// Slots allocated since construction or the last reset, in order.
    #[inline]
    pub fn active(&self) -> &[T] {
        self.block.prefix(self.offset)
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut [T] {
        self.block.prefix_mut(self.offset)
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.layout.size()
    }

    #[inline]
    pub fn element_align(&self) -> usize {
        self.layout.align()
    }

    /// Address of slot 0. Always a multiple of [`element_align`](Self::element_align).
    #[inline]
    pub fn base_addr(&self) -> usize {
        self.block.base_addr()
    }

    /// Bytes covered by all slots (`capacity * element_size`).
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.block.byte_len()
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn stats(&self) -> &ArenaStats {
        &self.stats
    }
}

impl<T> Index<Handle<T>> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(slot) => slot,
            None => panic!("{handle} does not belong to arena {}", self.id),
        }
    }
}

impl<T> IndexMut<Handle<T>> for Arena<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        let id = self.id;
        match self.get_mut(handle) {
            Some(slot) => slot,
            None => panic!("{handle} does not belong to arena {id}"),
        }
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("element", &std::any::type_name::<T>())
            .field("usage", &self.offset)
            .field("capacity", &self.capacity())
            .field("layout", &self.layout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Sample {
        id: u64,
        value: f64,
    }

    #[test]
    fn test_arena_zero_capacity() {
        let err = Arena::<Sample>::new(0).unwrap_err();
        assert_eq!(err, ArenaError::InvalidCapacity { requested: 0 });
    }

    #[test]
    fn test_arena_alloc_sequential_slots() {
        let mut arena = Arena::<Sample>::new(4).unwrap();
        let size = arena.element_size();
        let base = arena.base_addr();

        for k in 0..4 {
            let handle = arena.alloc().unwrap();
            assert_eq!(handle.index(), k);
            let ptr = arena.slot_ptr(handle).unwrap();
            assert_eq!(ptr as usize, base + k * size);
        }
        assert!(arena.is_full());
    }

    #[test]
    fn test_arena_capacity_exceeded_leaves_state() {
        let mut arena = Arena::<Sample>::new(2).unwrap();
        arena.alloc().unwrap();
        arena.alloc().unwrap();

        let err = arena.alloc().unwrap_err();
        assert_eq!(err, ArenaError::CapacityExceeded { capacity: 2 });
        assert_eq!(arena.current_usage(), 2);
        assert_eq!(arena.stats().failed_allocations(), 1);

        arena.reset();
        assert!(arena.alloc().is_ok());
    }

    #[test]
    fn test_arena_mutate_in_place() {
        let mut arena = Arena::<Sample>::new(3).unwrap();
        let handle = arena.alloc().unwrap();
        arena[handle].id = 42;
        arena.get_mut(handle).unwrap().value = 1.5;

        assert_eq!(
            arena.get(handle),
            Some(&Sample {
                id: 42,
                value: 1.5
            })
        );
        assert_eq!(arena.active().len(), 1);
    }

    #[test]
    fn test_arena_alloc_with() {
        let mut arena = Arena::<Sample>::new(2).unwrap();
        let a = arena.alloc_with(Sample { id: 1, value: 0.5 }).unwrap();
        let b = arena.alloc_with(Sample { id: 2, value: 1.0 }).unwrap();
        assert_eq!(arena[a].id, 1);
        assert_eq!(arena[b].id, 2);
        assert_eq!(
            arena.alloc_with(Sample::default()),
            Err(ArenaError::CapacityExceeded { capacity: 2 })
        );
    }

    #[test]
    fn test_arena_reset_reuses_storage() {
        let mut arena = Arena::<Sample>::new(3).unwrap();
        let first = arena.alloc().unwrap();
        let first_ptr = arena.slot_ptr(first).unwrap();
        arena.alloc().unwrap();

        arena.reset();
        assert_eq!(arena.current_usage(), 0);
        assert!(arena.is_empty());

        let again = arena.alloc().unwrap();
        assert_eq!(again, first);
        assert_eq!(arena.slot_ptr(again), Some(first_ptr));
    }

    #[test]
    fn test_active_range_tracks_usage() {
        let mut arena = Arena::<u32>::new(4).unwrap();
        assert_eq!(arena.remaining(), 4);
        arena.alloc_with(1).unwrap();
        arena.alloc_with(2).unwrap();

        for value in arena.active_mut() {
            *value *= 10;
        }
        assert_eq!(arena.active(), &[10, 20]);
        assert_eq!(arena.remaining(), 2);

        arena.reset();
        assert!(arena.active().is_empty());
        assert_eq!(arena.remaining(), 4);
    }

    #[test]
    fn test_validate_rejects_foreign_handle() {
        let mut mine = Arena::<Sample>::new(2).unwrap();
        let mut other = Arena::<Sample>::new(2).unwrap();
        let foreign = other.alloc().unwrap();
        let own = mine.alloc().unwrap();

        assert!(mine.validate(own));
        assert!(!mine.validate(foreign));
        assert!(mine.get(foreign).is_none());
        assert!(mine.slot_ptr(foreign).is_none());
    }

    #[test]
    fn test_validate_ignores_active_range() {
        let mut arena = Arena::<Sample>::new(2).unwrap();
        let handle = arena.alloc().unwrap();
        arena.reset();
        // Stale but still inside the block.
        assert!(arena.validate(handle));
    }

    #[test]
    fn test_contains_ptr_bounds_and_alignment() {
        let mut arena = Arena::<u64>::new(4).unwrap();
        let handle = arena.alloc().unwrap();
        let ptr = arena.slot_ptr(handle).unwrap();

        assert!(arena.contains_ptr(ptr));
        assert!(arena.contains_ptr(ptr.wrapping_add(3)));
        assert!(!arena.contains_ptr(ptr.wrapping_add(4)));
        assert!(!arena.contains_ptr(ptr.wrapping_sub(1)));
        assert!(!arena.contains_ptr(ptr.wrapping_byte_add(4)));

        let outside = 7u64;
        assert!(!arena.contains_ptr(&outside));
    }

    #[test]
    #[should_panic(expected = "does not belong to arena")]
    fn test_index_foreign_handle_panics() {
        let arena = Arena::<Sample>::new(1).unwrap();
        let mut other = Arena::<Sample>::new(1).unwrap();
        let foreign = other.alloc().unwrap();
        let _ = &arena[foreign];
    }

    #[test]
    fn test_zero_sized_elements() {
        let mut arena = Arena::<()>::new(3).unwrap();
        let a = arena.alloc().unwrap();
        let b = arena.alloc().unwrap();
        assert_eq!(arena.element_size(), 0);
        assert_eq!(arena.slot_ptr(a), arena.slot_ptr(b));
        assert!(arena.validate(b));
        assert!(arena.contains_ptr(arena.base_addr() as *const ()));
    }

    #[test]
    fn test_arena_ids_are_unique() {
        let a = Arena::<u8>::new(1).unwrap();
        let b = Arena::<u8>::new(1).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[traced_test]
    #[test]
    fn test_arena_logs_lifecycle() {
        let mut arena = Arena::<Sample>::new(1).unwrap();
        arena.alloc().unwrap();
        let _ = arena.alloc();
        arena.reset();

        assert!(logs_contain("arena initialized"));
        assert!(logs_contain("arena capacity exceeded"));
        assert!(logs_contain("arena reset"));
    }
}

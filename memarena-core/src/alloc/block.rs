//! ## memarena-core::alloc::block
//! **Owned slot storage backing an arena**
//!
//! A [`RawBlock`] is one contiguous, exclusively owned allocation of exactly
//! `capacity` slots. Slot size and alignment come from the element type's own
//! layout, so the block never carries padding that could be handed out as a
//! slot. The block is released as a single unit when dropped.

use std::alloc::Layout;
use std::mem;

use crate::error::ArenaError;

/// Size and alignment of one arena slot, derived from the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLayout {
    size: usize,
    align: usize,
}

impl SlotLayout {
    /// Layout of a single slot holding a `T`.
    pub fn of<T>() -> Self {
        let layout = Layout::new::<T>();
        Self {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Slot stride in bytes (a multiple of [`align`](Self::align)).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn align(&self) -> usize {
        self.align
    }
}

/// Contiguous storage for `capacity` values of `T`.
pub(crate) struct RawBlock<T> {
    slots: Box<[T]>,
}

impl<T: Default> RawBlock<T> {
    /// Reserves and fills `capacity` slots with `T::default()`.
    ///
    /// Sizes that overflow `isize` or that the allocator refuses are reported
    /// as [`ArenaError::StorageTooLarge`] instead of aborting.
    pub(crate) fn new(capacity: usize) -> Result<Self, ArenaError> {
        let too_large = || ArenaError::StorageTooLarge {
            capacity,
            element_size: mem::size_of::<T>(),
        };

        Layout::array::<T>(capacity).map_err(|_| too_large())?;

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity).map_err(|_| too_large())?;
        slots.resize_with(capacity, T::default);

        Ok(Self {
            slots: slots.into_boxed_slice(),
        })
    }
}

impl<T> RawBlock<T> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Address of slot 0.
    #[inline]
    pub(crate) fn base_addr(&self) -> usize {
        self.slots.as_ptr() as usize
    }

    /// Number of bytes covered by the slots.
    #[inline]
    pub(crate) fn byte_len(&self) -> usize {
        mem::size_of_val(&*self.slots)
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    #[inline]
    pub(crate) fn slot_ptr(&self, index: usize) -> Option<*const T> {
        self.slots.get(index).map(|slot| slot as *const T)
    }

    /// Maps an address back to its slot index.
    ///
    /// Returns `None` when `addr` lies outside `[base, base + byte_len)` or
    /// sits between slot boundaries. For zero-sized `T` every slot shares the
    /// base address, so only the base maps (to slot 0).
    pub(crate) fn index_of_addr(&self, addr: usize) -> Option<usize> {
        let base = self.base_addr();
        let size = mem::size_of::<T>();

        if size == 0 {
            return (addr == base && !self.slots.is_empty()).then_some(0);
        }

        let delta = addr.checked_sub(base)?;
        if delta >= self.byte_len() || delta % size != 0 {
            return None;
        }
        Some(delta / size)
    }

    #[inline]
    pub(crate) fn prefix(&self, len: usize) -> &[T] {
        &self.slots[..len]
    }

    #[inline]
    pub(crate) fn prefix_mut(&mut self, len: usize) -> &mut [T] {
        &mut self.slots[..len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C, align(16))]
    #[derive(Default)]
    struct Wide {
        _a: u64,
        _b: u8,
    }

    #[test]
    fn test_slot_layout_follows_type_layout() {
        let layout = SlotLayout::of::<Wide>();
        assert_eq!(layout.align(), 16);
        assert_eq!(layout.size(), 16);

        let layout = SlotLayout::of::<u8>();
        assert_eq!((layout.size(), layout.align()), (1, 1));
    }

    #[test]
    fn test_block_base_is_aligned() {
        let block = RawBlock::<Wide>::new(7).unwrap();
        assert_eq!(block.base_addr() % 16, 0);
        assert_eq!(block.len(), 7);
        assert_eq!(block.byte_len(), 7 * 16);
    }

    #[test]
    fn test_index_of_addr() {
        let block = RawBlock::<u32>::new(4).unwrap();
        let base = block.base_addr();

        assert_eq!(block.index_of_addr(base), Some(0));
        assert_eq!(block.index_of_addr(base + 12), Some(3));
        assert_eq!(block.index_of_addr(base + 16), None);
        assert_eq!(block.index_of_addr(base + 2), None);
        assert_eq!(block.index_of_addr(base.wrapping_sub(4)), None);
    }

    #[test]
    fn test_zero_sized_slots_share_base() {
        let block = RawBlock::<()>::new(3).unwrap();
        assert_eq!(block.byte_len(), 0);
        assert_eq!(block.index_of_addr(block.base_addr()), Some(0));
        assert_eq!(block.index_of_addr(block.base_addr() + 1), None);
    }

    #[test]
    fn test_oversized_block_is_rejected() {
        let err = RawBlock::<u64>::new(usize::MAX / 4).err();
        assert_eq!(
            err,
            Some(ArenaError::StorageTooLarge {
                capacity: usize::MAX / 4,
                element_size: 8
            })
        );
    }
}

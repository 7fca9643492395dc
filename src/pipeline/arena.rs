//! Per-build scratch memory.
//!
//! A [`ScratchArena`] belongs to exactly one pipeline build. Stages refer to their memory through
//! [`ScratchSlot`] handles, which stay valid until the arena is dropped or reset. Nothing is freed
//! individually.

/// Handle to a contiguous run of floats inside a [`ScratchArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScratchSlot {
    offset: usize,
    len: usize,
}

impl ScratchSlot {
    /// Number of floats in the slot.
    pub fn len(self) -> usize {
        self.len
    }

    /// Return `true` for a zero-length slot.
    pub fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Bump allocator of `f32` scratch storage scoped to one pipeline build.
#[derive(Debug, Default)]
pub struct ScratchArena {
    storage: Vec<f32>,
    allocations: usize,
}

impl ScratchArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `len` zeroed floats.
    pub fn allocate(&mut self, len: usize) -> ScratchSlot {
        let offset = self.storage.len();
        self.storage.resize(offset + len, 0.0);
        self.allocations += 1;
        ScratchSlot { offset, len }
    }

    /// Return `true` when `slot` lies inside this arena's live storage.
    pub fn contains(&self, slot: ScratchSlot) -> bool {
        slot.offset
            .checked_add(slot.len)
            .is_some_and(|end| end <= self.storage.len())
    }

    /// Read access to a slot.
    ///
    /// Panics if `slot` was not handed out by this arena.
    pub fn slot(&self, slot: ScratchSlot) -> &[f32] {
        &self.storage[slot.offset..slot.offset + slot.len]
    }

    /// Write access to a slot.
    ///
    /// Panics if `slot` was not handed out by this arena.
    pub fn slot_mut(&mut self, slot: ScratchSlot) -> &mut [f32] {
        &mut self.storage[slot.offset..slot.offset + slot.len]
    }

    /// Number of slots handed out since creation or the last [`ScratchArena::reset`].
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }

    /// Total bytes reserved by live slots.
    pub fn bytes_reserved(&self) -> usize {
        self.storage.len() * std::mem::size_of::<f32>()
    }

    /// Drop all slots, keeping capacity for the next build.
    pub fn reset(&mut self) {
        self.storage.clear();
        self.allocations = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/arena.rs"]
mod tests;

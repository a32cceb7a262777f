use tracing::{debug, warn};

use crate::arena::span::Span;
use crate::error::{Error, Result};

/// Fixed-capacity bump allocator over one owned, zero-initialised byte block.
///
/// The arena never grows. Allocations hand out [`Span`]s (byte ranges) and
/// there is no per-allocation free: the whole block is released when the
/// arena is dropped. Typed fields are read and written at byte offsets in
/// little-endian order, so records need no alignment.
#[derive(Debug)]
pub struct Arena {
    memory: Box<[u8]>,
    used: usize,
}

impl Arena {
    /// Allocates a zeroed block of `capacity` bytes.
    ///
    /// Fails with [`Error::AllocationFailure`] instead of aborting when the
    /// system allocator cannot provide the block.
    pub fn create(capacity: usize) -> Result<Arena> {
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(capacity)
            .map_err(|_| Error::AllocationFailure { requested: capacity })?;
        memory.resize(capacity, 0u8);

        debug!(capacity, "arena created");
        Ok(Arena {
            memory: memory.into_boxed_slice(),
            used: 0,
        })
    }

    /// Reserves the next `size` bytes and advances the used offset.
    ///
    /// On [`Error::OutOfMemory`] the arena is left unchanged.
    pub fn allocate(&mut self, size: usize) -> Result<Span> {
        let remaining = self.remaining();
        if size > remaining {
            warn!(requested = size, remaining, "arena exhausted");
            return Err(Error::OutOfMemory {
                requested: size,
                remaining,
            });
        }

        let span = Span::new(self.used, size);
        self.used += size;
        Ok(span)
    }

    /// Total capacity in bytes.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    /// Bytes handed out so far.
    #[inline(always)]
    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes still available.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    /// Whether every byte has been handed out.
    pub fn is_full(&self) -> bool {
        self.used == self.capacity()
    }

    /// Raw view of the allocated prefix of the block.
    pub fn bytes(&self) -> &[u8] {
        &self.memory[..self.used]
    }

    #[inline]
    pub(crate) fn read_f64(&self, offset: usize) -> f64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.memory[offset..offset + 8]);
        f64::from_le_bytes(raw)
    }

    #[inline]
    pub(crate) fn write_f64(&mut self, offset: usize, value: f64) {
        self.memory[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub(crate) fn read_u32(&self, offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.memory[offset..offset + 4]);
        u32::from_le_bytes(raw)
    }

    #[inline]
    pub(crate) fn write_u32(&mut self, offset: usize, value: u32) {
        self.memory[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

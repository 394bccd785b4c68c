//! Scope-owned scratch buffer
//!
//! Holds a whole asset in memory while it is decoded. The allocation is
//! released when the buffer is dropped, so every exit path frees it exactly
//! once.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::error::StorageError;
use crate::storage::AssetStorage;

#[derive(Debug)]
pub struct ScratchBuffer {
    bytes: Vec<u8>,
}

impl ScratchBuffer {
    /// Allocate a zeroed buffer of exactly `len` bytes
    ///
    /// Returns [`StorageError::NoMemory`] instead of aborting when the heap
    /// cannot satisfy the request.
    pub fn allocate(len: usize) -> Result<Self, StorageError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|_| StorageError::NoMemory(len))?;
        bytes.resize(len, 0);
        Ok(Self { bytes })
    }

    /// Read a whole stored file into a fresh buffer sized to its length
    pub fn load<S: AssetStorage>(storage: &mut S, path: &str, len: usize) -> Result<Self, StorageError> {
        let mut buffer = Self::allocate(len)?;
        let read = storage.read(path, &mut buffer).map_err(|e| {
            log::warn!("storage: read of {} failed: {:?}", path, e);
            StorageError::Read
        })?;
        if read < len {
            // File shrank between the size query and the read
            buffer.bytes.truncate(read);
        }
        if buffer.is_empty() {
            return Err(StorageError::Empty);
        }
        Ok(buffer)
    }
}

impl Deref for ScratchBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

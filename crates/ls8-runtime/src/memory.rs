//! Flat byte-addressable RAM
//!
//! All reads and writes are bounds-checked. Addresses are never wrapped:
//! touching a cell outside `[0, MEMORY_SIZE)` is a fatal error.

use crate::error::RuntimeError;
use crate::image::ProgramImage;

/// Number of addressable bytes
pub const MEMORY_SIZE: usize = 256;

/// Machine memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Create zero-initialized memory
    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Read the byte stored at `address`
    pub fn read(&self, address: usize) -> Result<u8, RuntimeError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(RuntimeError::OutOfBounds { address })
    }

    /// Store `value` at `address`
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), RuntimeError> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(RuntimeError::OutOfBounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Non-failing read used for diagnostics (tracing past the top of memory)
    pub fn peek(&self, address: usize) -> Option<u8> {
        self.cells.get(address).copied()
    }

    /// Copy a program image into memory starting at address 0
    ///
    /// Goes through [`Memory::write`], so an image larger than memory fails at
    /// the first address past the end.
    pub fn load(&mut self, image: &ProgramImage) -> Result<(), RuntimeError> {
        for (address, byte) in image.bytes().iter().enumerate() {
            self.write(address, *byte)?;
        }
        Ok(())
    }

    /// Raw view of every cell
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

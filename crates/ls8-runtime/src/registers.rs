//! General-purpose register file
//!
//! Eight byte-wide slots. Slot 7 doubles as the stack pointer and starts at
//! [`STACK_POINTER_INIT`]; everything else starts at zero.

use crate::error::RuntimeError;

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Index of the register used as the stack pointer
pub const STACK_POINTER: u8 = 7;

/// Initial stack pointer: the stack grows down from just below the top of memory
pub const STACK_POINTER_INIT: u8 = 0xF4;

/// Register file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    slots: [u8; REGISTER_COUNT],
}

impl Registers {
    /// Create a register file in its power-on state
    pub fn new() -> Self {
        let mut slots = [0; REGISTER_COUNT];
        slots[STACK_POINTER as usize] = STACK_POINTER_INIT;
        Self { slots }
    }

    /// Read register `index`
    pub fn get(&self, index: u8) -> Result<u8, RuntimeError> {
        self.slots
            .get(index as usize)
            .copied()
            .ok_or(RuntimeError::InvalidRegister { index })
    }

    /// Write register `index`
    pub fn set(&mut self, index: u8, value: u8) -> Result<(), RuntimeError> {
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(RuntimeError::InvalidRegister { index })?;
        *slot = value;
        Ok(())
    }

    pub fn stack_pointer(&self) -> u8 {
        self.slots[STACK_POINTER as usize]
    }

    pub fn set_stack_pointer(&mut self, value: u8) {
        self.slots[STACK_POINTER as usize] = value;
    }

    /// Copy of all slots, R0 first
    pub fn snapshot(&self) -> [u8; REGISTER_COUNT] {
        self.slots
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

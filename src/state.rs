use log::warn;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    STACK_SIZE,
};
use crate::error::{Error, Result};
use crate::keypad::Keypad;
use crate::timers::Timers;

/// The machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) index of the next free stack slot, in `0..=16`
///
/// ## Memory
/// - 16 return addresses of stack
/// - 4096 bytes of addressable memory
///     - 0x000 - 0x04F is the sprite sheet; nothing below 0x200 is writable once initialized
/// - 32 rows of 64 pixels in the frame buffer
///
/// ## Input
/// - a 16-bit mask tracking the pressed status of keys 0..F
/// - emulation halts while a register is waiting for a key
#[derive(Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub keypad: Keypad,
    pub mode: Mode,
}

/// The FrameBuffer is indexed by row; bit 63 of a row is its leftmost pixel (x = 0)
pub type FrameBuffer = [u64; DISPLAY_HEIGHT];

/// Whether the CPU is executing or halted until a key is pressed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// The pressed key will be written to this register
    WaitingForKeyInto(u8),
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [0; DISPLAY_HEIGHT],
            timers: Timers::default(),
            keypad: Keypad::new(),
            mode: Mode::Running,
        }
    }

    /// Address of the instruction currently being executed.
    ///
    /// The pc is advanced before execution, so this is the word before it.
    pub fn current_address(&self) -> u16 {
        self.pc.wrapping_sub(2) & ADDRESS_MASK
    }

    /// Gets the instruction word pointed at by the pc.
    /// Memory is stored as bytes, but instructions are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read_byte(self.pc));
        let right = u16::from(self.read_byte(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Moves the pc onto the next instruction
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2) & ADDRESS_MASK;
    }

    /// PC = target, refusing anything outside the program region
    pub fn jump(&mut self, target: u16) -> Result<()> {
        if target < PROGRAM_START || usize::from(target) >= MEMORY_SIZE {
            return Err(Error::InvalidJumpTarget {
                address: self.current_address(),
                target,
            });
        }
        self.pc = target;
        Ok(())
    }

    /// STACK.push(PC)
    pub fn push(&mut self) -> Result<()> {
        let slot = usize::from(self.sp);
        if slot >= STACK_SIZE {
            return Err(Error::StackOverflow {
                address: self.current_address(),
            });
        }
        self.stack[slot] = self.pc;
        self.sp += 1;
        Ok(())
    }

    /// PC = STACK.pop()
    pub fn pop(&mut self) -> Result<()> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow {
                address: self.current_address(),
            });
        }
        self.sp -= 1;
        self.pc = self.stack[usize::from(self.sp)];
        Ok(())
    }

    /// Reads a byte, wrapping the address into memory
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    /// Writes a byte, wrapping the address into memory.
    /// Writes into the interpreter area below 0x200 are dropped.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        let addr = addr & ADDRESS_MASK;
        if addr < PROGRAM_START {
            warn!(
                "ignoring write of {:#04X} to reserved address {:#05X} at {:#05X}",
                value,
                addr,
                self.current_address()
            );
            return;
        }
        self.memory[usize::from(addr)] = value;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.mode, Mode::Running);
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
        assert!(state.frame_buffer.iter().all(|&row| row == 0));
    }

    #[test]
    fn test_fetch_combines_bytes() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), 0xAABB);
    }

    #[test]
    fn test_advance_pc_wraps() {
        let mut state = State::new();
        state.pc = 0xFFE;
        state.advance_pc();
        assert_eq!(state.pc, 0x000);
    }

    #[test]
    fn test_jump_bounds() {
        let mut state = State::new();
        assert!(matches!(
            state.jump(0x1FF),
            Err(Error::InvalidJumpTarget { target: 0x1FF, .. })
        ));
        assert_eq!(state.pc, 0x200);
        assert!(state.jump(0x200).is_ok());
        assert!(state.jump(0xFFF).is_ok());
        assert!(state.jump(0x1000).is_err());
    }

    #[test]
    fn test_stack_limits() -> Result<()> {
        let mut state = State::new();
        assert!(matches!(state.pop(), Err(Error::StackUnderflow { .. })));
        for _ in 0..STACK_SIZE {
            state.push()?;
        }
        assert_eq!(state.sp, 16);
        assert!(matches!(state.push(), Err(Error::StackOverflow { .. })));
        Ok(())
    }

    #[test]
    fn test_writes_below_program_are_dropped() {
        let mut state = State::new();
        state.write_byte(0x000, 0x12);
        state.write_byte(0x1200, 0x34);
        assert_eq!(state.memory[0x000], SPRITE_SHEET[0]);
        assert_eq!(state.memory[0x200], 0x34);
    }
}

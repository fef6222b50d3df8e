use std::io::Read;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Error, Result};
use crate::instruction::decode;
use crate::keypad::Keypad;
use crate::state::{FrameBuffer, Mode, State};
use crate::timers::Buzzer;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the keypad as it was at the last key-wait check
///  - the random number generator used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    last_keypad: Keypad,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random numbers are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            last_keypad: Keypad::new(),
            rng,
        }
    }

    /// Copies a ROM into memory at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program; at most 3584 bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::out_of_memory(rom.len()));
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        info!("loaded ROM [size: {}]", rom.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keypad.release(key);
    }

    pub fn keypad(&self) -> Keypad {
        self.state.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.state.keypad
    }

    /// Advances the CPU by a single cycle
    /// - does nothing if awaiting a keypress
    /// - fetches the next instruction and moves the pc past it
    /// - decodes and executes it
    pub fn advance_cpu(&mut self) -> Result<()> {
        if self.state.mode != Mode::Running {
            return Ok(());
        }

        let address = self.state.pc;
        let op = self.state.fetch();
        self.state.advance_pc();
        let instruction = decode(op);
        trace!(
            "{:03X}: {:04X} {:<16} v{:02X?} i{:04X}",
            address,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        instruction.execute(op, &mut self.state, &mut self.rng)
    }

    /// Resolves a pending `Fx0A`.
    ///
    /// A key counts if it's held now but wasn't at the previous check; when several are
    /// the lowest one is written to the waiting register.
    pub fn check_key_wait(&mut self) {
        let keypad = self.state.keypad;
        let fresh = keypad.newly_pressed(self.last_keypad);
        self.last_keypad = keypad;

        if let (Mode::WaitingForKeyInto(register), Some(key)) = (self.state.mode, fresh) {
            debug!("key {:X} pressed into V{:X}", key, register);
            self.state.v[register as usize] = key;
            self.state.mode = Mode::Running;
        }
    }

    /// Decrements the delay and sound timers once
    pub fn advance_timers(&mut self) -> Buzzer {
        self.state.timers.tick()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEMORY_SIZE;

    #[test]
    fn test_loads_largest_rom() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_rom(&[0xAB; 3584])?;
        assert_eq!(chip8.state.memory[0x200], 0xAB);
        assert_eq!(chip8.state.memory[MEMORY_SIZE - 1], 0xAB);
        Ok(())
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut chip8 = Chip8::with_seed(0);
        let result = chip8.load_rom(&[0xAB; 3585]);
        assert!(matches!(
            result,
            Err(Error::OutOfMemory {
                size: 3585,
                max: 3584
            })
        ));
        assert_eq!(chip8.state.memory[0x200], 0x00);
    }

    #[test]
    fn test_loads_rom_from_reader() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        let mut rom: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        chip8.load_rom_from(&mut rom)?;
        assert_eq!(chip8.state.memory[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
        Ok(())
    }

    #[test]
    fn test_cycles_while_running() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        // insert a cls instruction so we don't fail on an empty word
        chip8.load_rom(&[0x00, 0xE0])?;
        chip8.advance_cpu()?;
        assert_eq!(chip8.state.pc, 0x202);
        Ok(())
    }

    #[test]
    fn test_empty_memory_is_not_implemented() {
        let mut chip8 = Chip8::with_seed(0);
        assert!(matches!(
            chip8.advance_cpu(),
            Err(Error::NotImplemented {
                address: 0x200,
                op: 0x0000
            })
        ));
    }

    #[test]
    fn test_doesnt_cycle_while_waiting_for_key() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_rom(&[0xF1, 0x0A, 0x00, 0xE0])?;
        chip8.advance_cpu()?;
        assert_eq!(chip8.mode(), Mode::WaitingForKeyInto(0x1));
        for _ in 0..100 {
            chip8.check_key_wait();
            chip8.advance_cpu()?;
        }
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v, [0; 16]);
        Ok(())
    }

    #[test]
    fn test_captures_key_presses() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_rom(&[0xF1, 0x0A])?;
        chip8.advance_cpu()?;
        chip8.key_press(0xE);
        chip8.key_press(0x3);
        chip8.check_key_wait();
        assert_eq!(chip8.mode(), Mode::Running);
        assert_eq!(chip8.state.v[0x1], 0x3);
        Ok(())
    }

    #[test]
    fn test_held_keys_dont_satisfy_a_wait() -> Result<()> {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_rom(&[0xF1, 0x0A])?;
        chip8.key_press(0x5);
        chip8.check_key_wait();
        chip8.advance_cpu()?;
        chip8.check_key_wait();
        assert_eq!(chip8.mode(), Mode::WaitingForKeyInto(0x1));

        chip8.key_release(0x5);
        chip8.check_key_wait();
        chip8.key_press(0x5);
        chip8.check_key_wait();
        assert_eq!(chip8.mode(), Mode::Running);
        assert_eq!(chip8.state.v[0x1], 0x5);
        Ok(())
    }

    #[test]
    fn test_timers_count_down() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.timers.sound = 1;
        chip8.state.timers.delay = 2;
        assert_eq!(chip8.advance_timers(), Buzzer::Stopped);
        assert_eq!(chip8.advance_timers(), Buzzer::Silent);
        assert_eq!(chip8.state.timers.delay, 0);
    }

    #[test]
    fn test_seeded_machines_agree() -> Result<()> {
        let rom = [0xC0, 0xFF, 0xC1, 0xFF];
        let mut a = Chip8::with_seed(42);
        let mut b = Chip8::with_seed(42);
        for chip8 in [&mut a, &mut b] {
            chip8.load_rom(&rom)?;
            chip8.advance_cpu()?;
            chip8.advance_cpu()?;
        }
        assert_eq!(a.state.v, b.state.v);
        Ok(())
    }
}

/// # Keypad
/// Hexadecimal keypad state; bit `n` is set while key `n` is held.
///
/// Only the input collaborator presses and releases keys, the CPU only reads them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad(u16);

impl Keypad {
    pub fn new() -> Self {
        Keypad(0)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit of the key; only the low nibble is used
    pub fn press(&mut self, key: u8) {
        self.0 |= 1 << (key & 0xF);
    }

    /// Unset the pressed status of key
    pub fn release(&mut self, key: u8) {
        self.0 &= !(1 << (key & 0xF));
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.0 & (1 << (key & 0xF)) != 0
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// The lowest key that is held now but wasn't in `previous`
    pub fn newly_pressed(&self, previous: Keypad) -> Option<u8> {
        let fresh = self.0 & !previous.0;
        if fresh == 0 {
            None
        } else {
            Some(fresh.trailing_zeros() as u8)
        }
    }
}

impl From<u16> for Keypad {
    fn from(bits: u16) -> Self {
        Keypad(bits)
    }
}

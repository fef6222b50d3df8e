pub use chip8::Chip8;
pub use error::{Error, Result};
pub use instruction::{decode, Instruction};
pub use keypad::Keypad;
pub use run::{run, Config, Control, Frontend};
pub use state::{FrameBuffer, Mode, State};
pub use timers::Buzzer;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod run;
pub mod state;
mod timers;

use std::io;

use crate::constants::MAX_ROM_SIZE;

/// Errors that end an emulation session.
///
/// `address` is always the location of the instruction word that failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid jump target {target:#05X} at {address:#05X}")]
    InvalidJumpTarget { address: u16, target: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    OutOfMemory { size: usize, max: usize },

    #[error("stack overflow: call at {address:#05X} with a full call stack")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("unknown instruction {op:#06X} at {address:#05X}")]
    UnknownInstruction { address: u16, op: u16 },

    #[error("instruction {op:#06X} at {address:#05X} is not implemented")]
    NotImplemented { address: u16, op: u16 },

    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn out_of_memory(size: usize) -> Self {
        Error::OutOfMemory {
            size,
            max: MAX_ROM_SIZE,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

use rand::Rng;

use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded instruction word.
///
/// Register operands are indices into V0..VF, `addr` is 12 bits wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clr,
    /// `00EE`
    Rts,
    /// `0nnn` call a native routine
    Sys { addr: u16 },
    /// `1nnn`
    Jump { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    Ske { x: u8, kk: u8 },
    /// `4xkk`
    Skne { x: u8, kk: u8 },
    /// `5xy0`
    Skre { x: u8, y: u8 },
    /// `6xkk`
    Load { x: u8, kk: u8 },
    /// `7xkk`
    Add { x: u8, kk: u8 },
    /// `8xy0`
    Mv { x: u8, y: u8 },
    /// `8xy1`
    Or { x: u8, y: u8 },
    /// `8xy2`
    And { x: u8, y: u8 },
    /// `8xy3`
    Xor { x: u8, y: u8 },
    /// `8xy4`
    Addr { x: u8, y: u8 },
    /// `8xy5`
    Sub { x: u8, y: u8 },
    /// `8xy6`
    Shr { x: u8, y: u8 },
    /// `8xy7`
    Subn { x: u8, y: u8 },
    /// `8xyE`
    Shl { x: u8, y: u8 },
    /// `9xy0`
    Skrne { x: u8, y: u8 },
    /// `Annn`
    Loadi { addr: u16 },
    /// `Bnnn`
    Jumpi { addr: u16 },
    /// `Cxkk`
    Rand { x: u8, kk: u8 },
    /// `Dxyn`
    Draw { x: u8, y: u8, n: u8 },
    /// `Ex9E`
    Skpr { x: u8 },
    /// `ExA1`
    Skup { x: u8 },
    /// `Fx07`
    Moved { x: u8 },
    /// `Fx0A`
    Keyd { x: u8 },
    /// `Fx15`
    Loads { x: u8 },
    /// `Fx18`
    Ld { x: u8 },
    /// `Fx1E`
    Addi { x: u8 },
    /// `Fx29`
    Ldspr { x: u8 },
    /// `Fx33`
    Bcd { x: u8 },
    /// `Fx55`
    Stor { x: u8 },
    /// `Fx65`
    Read { x: u8 },
    /// Any word that isn't in the instruction set
    Unknown(u16),
}

/// Selects the correct Instruction for a given instruction word
pub fn decode(op: u16) -> Instruction {
    use Instruction::*;

    match op {
        0x00E0 => return Clr,
        0x00EE => return Rts,
        _ => {}
    }

    let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
    match (op.family(), n) {
        (0x0, _) => Sys { addr },
        (0x1, _) => Jump { addr },
        (0x2, _) => Call { addr },
        (0x3, _) => Ske { x, kk },
        (0x4, _) => Skne { x, kk },
        (0x5, 0x0) => Skre { x, y },
        (0x6, _) => Load { x, kk },
        (0x7, _) => Add { x, kk },
        (0x8, 0x0) => Mv { x, y },
        (0x8, 0x1) => Or { x, y },
        (0x8, 0x2) => And { x, y },
        (0x8, 0x3) => Xor { x, y },
        (0x8, 0x4) => Addr { x, y },
        (0x8, 0x5) => Sub { x, y },
        (0x8, 0x6) => Shr { x, y },
        (0x8, 0x7) => Subn { x, y },
        (0x8, 0xE) => Shl { x, y },
        (0x9, 0x0) => Skrne { x, y },
        (0xA, _) => Loadi { addr },
        (0xB, _) => Jumpi { addr },
        (0xC, _) => Rand { x, kk },
        (0xD, _) => Draw { x, y, n },
        (0xE, _) => match kk {
            0x9E => Skpr { x },
            0xA1 => Skup { x },
            _ => Unknown(op),
        },
        (0xF, _) => match kk {
            0x07 => Moved { x },
            0x0A => Keyd { x },
            0x15 => Loads { x },
            0x18 => Ld { x },
            0x1E => Addi { x },
            0x29 => Ldspr { x },
            0x33 => Bcd { x },
            0x55 => Stor { x },
            0x65 => Read { x },
            _ => Unknown(op),
        },
        _ => Unknown(op),
    }
}

impl Instruction {
    /// Applies the instruction to `state`.
    ///
    /// The pc must already point past the instruction word; `op` is the word itself and
    /// is only used for diagnostics.
    pub fn execute<R: Rng + ?Sized>(
        self,
        op: u16,
        state: &mut State,
        rng: &mut R,
    ) -> Result<()> {
        use Instruction::*;

        match self {
            Clr => clr(state),
            Rts => rts(state),
            Sys { .. } => sys(op, state),
            Jump { addr } => jump(state, addr),
            Call { addr } => call(state, addr),
            Ske { x, kk } => ske(state, x, kk),
            Skne { x, kk } => skne(state, x, kk),
            Skre { x, y } => skre(state, x, y),
            Load { x, kk } => load(state, x, kk),
            Add { x, kk } => add(state, x, kk),
            Mv { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            Addr { x, y } => addr(state, x, y),
            Sub { x, y } => sub(state, x, y),
            Shr { x, .. } => shr(state, x),
            Subn { x, y } => subn(state, x, y),
            Shl { x, .. } => shl(state, x),
            Skrne { x, y } => skrne(state, x, y),
            Loadi { addr } => loadi(state, addr),
            Jumpi { addr } => jumpi(state, addr),
            Rand { x, kk } => rand(state, rng, x, kk),
            Draw { x, y, n } => draw(state, x, y, n),
            Skpr { x } => skpr(state, x),
            Skup { x } => skup(state, x),
            Moved { x } => moved(state, x),
            Keyd { x } => keyd(state, x),
            Loads { x } => loads(state, x),
            Ld { x } => ld(state, x),
            Addi { x } => addi(state, x),
            Ldspr { x } => ldspr(state, x),
            Bcd { x } => bcd(state, x),
            Stor { x } => stor(state, x),
            Read { x } => read(state, x),
            Unknown(_) => unknown(op, state),
        }
    }
}

/// Assembly text, e.g. `ADD V1, V2`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clr => write!(f, "CLS"),
            Rts => write!(f, "RET"),
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            Ske { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Skne { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Skre { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Add { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Mv { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Addr { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Skrne { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Loadi { addr } => write!(f, "LD I, {:#05X}", addr),
            Jumpi { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rand { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skpr { x } => write!(f, "SKP V{:X}", x),
            Skup { x } => write!(f, "SKNP V{:X}", x),
            Moved { x } => write!(f, "LD V{:X}, DT", x),
            Keyd { x } => write!(f, "LD V{:X}, K", x),
            Loads { x } => write!(f, "LD DT, V{:X}", x),
            Ld { x } => write!(f, "LD ST, V{:X}", x),
            Addi { x } => write!(f, "ADD I, V{:X}", x),
            Ldspr { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Stor { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(op) => write!(f, "??? {:#06X}", op),
        }
    }
}

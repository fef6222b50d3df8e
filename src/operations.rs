use log::debug;
use rand::Rng;

use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_GLYPH_SIZE};
use crate::error::{Error, Result};
use crate::state::{Mode, State};

// Every operation runs with the pc already pointing at the next instruction.

/// Skips the next instruction if `condition` holds
fn skip_if(state: &mut State, condition: bool) -> Result<()> {
    if condition {
        state.advance_pc();
    }
    Ok(())
}

/// Writes `result` to Vx and then `flag` to VF, so the flag wins when x is F
fn set_with_flag(state: &mut State, x: u8, result: u8, flag: bool) -> Result<()> {
    state.v[x as usize] = result;
    state.v[FLAG] = u8::from(flag);
    Ok(())
}

/// clear
pub fn clr(state: &mut State) -> Result<()> {
    state.frame_buffer = [0; DISPLAY_HEIGHT];
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<()> {
    state.pop()
}

/// native routine call; there is nothing to call into
pub fn sys(op: u16, state: &mut State) -> Result<()> {
    Err(Error::NotImplemented {
        address: state.current_address(),
        op,
    })
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Result<()> {
    state.jump(addr)
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<()> {
    state.push()?;
    state.jump(addr)
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) -> Result<()> {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) -> Result<()> {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) -> Result<()> {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition)
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> Result<()> {
    state.v[x as usize] = kk;
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) -> Result<()> {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
    Ok(())
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> Result<()> {
    state.v[x as usize] = state.v[y as usize];
    Ok(())
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> Result<()> {
    state.v[x as usize] |= state.v[y as usize];
    Ok(())
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> Result<()> {
    state.v[x as usize] &= state.v[y as usize];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> Result<()> {
    state.v[x as usize] ^= state.v[y as usize];
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) -> Result<()> {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    set_with_flag(state, x, res, over)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: u8, y: u8) -> Result<()> {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    set_with_flag(state, x, res, !under)
}

/// Vx >>= 1; VF = the bit shifted out
/// Vy is ignored.
pub fn shr(state: &mut State, x: u8) -> Result<()> {
    let vx = state.v[x as usize];
    set_with_flag(state, x, vx >> 1, vx & 0x1 == 0x1)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: u8, y: u8) -> Result<()> {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    set_with_flag(state, x, res, !under)
}

/// Vx <<= 1; VF = the bit shifted out
/// Vy is ignored.
pub fn shl(state: &mut State, x: u8) -> Result<()> {
    let vx = state.v[x as usize];
    set_with_flag(state, x, vx << 1, vx & 0x80 == 0x80)
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) -> Result<()> {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Result<()> {
    state.i = addr;
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> Result<()> {
    let target = (u16::from(state.v[0x0]) + addr) & ADDRESS_MASK;
    state.jump(target)
}

/// Vx = rand_byte & kk
pub fn rand<R: Rng + ?Sized>(state: &mut State, rng: &mut R, x: u8, kk: u8) -> Result<()> {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & kk;
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<()> {
    let column = state.v[x as usize] as u32 % DISPLAY_WIDTH as u32;
    let top = state.v[y as usize] as usize;
    let mut collision = 0;

    for byte in 0..n {
        let sprite_row = state.read_byte(state.i.wrapping_add(u16::from(byte)));
        // the sprite's leftmost pixel starts at bit 63 and wraps around the row
        let pattern = (u64::from(sprite_row) << (DISPLAY_WIDTH - 8)).rotate_right(column);
        let row = &mut state.frame_buffer[(top + byte as usize) % DISPLAY_HEIGHT];
        collision |= *row & pattern;
        *row ^= pattern;
    }

    state.v[FLAG] = u8::from(collision != 0);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) -> Result<()> {
    let condition = state.keypad.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) -> Result<()> {
    let condition = !state.keypad.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> Result<()> {
    state.v[x as usize] = state.timers.delay;
    Ok(())
}

/// await keypress for Vx
pub fn keyd(state: &mut State, x: u8) -> Result<()> {
    debug!("waiting for a key press into V{:X}", x);
    state.mode = Mode::WaitingForKeyInto(x);
    Ok(())
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> Result<()> {
    state.timers.delay = state.v[x as usize];
    Ok(())
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> Result<()> {
    state.timers.sound = state.v[x as usize];
    Ok(())
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low digit of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: u8) -> Result<()> {
    state.i = u16::from(state.v[x as usize] & 0xF) * FONT_GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<()> {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in (0..).zip(digits) {
        state.write_byte(state.i.wrapping_add(offset), digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
/// I is left where it was
pub fn stor(state: &mut State, x: u8) -> Result<()> {
    for register in 0..=x {
        let value = state.v[register as usize];
        state.write_byte(state.i.wrapping_add(u16::from(register)), value);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
/// I is left where it was
pub fn read(state: &mut State, x: u8) -> Result<()> {
    for register in 0..=x {
        state.v[register as usize] = state.read_byte(state.i.wrapping_add(u16::from(register)));
    }
    Ok(())
}

/// Any word outside the instruction set
pub fn unknown(op: u16, state: &mut State) -> Result<()> {
    Err(Error::UnknownInstruction {
        address: state.current_address(),
        op,
    })
}

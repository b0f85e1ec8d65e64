use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, GLYPH_SIZE, REGISTER_COUNT};
use crate::error::Result;
use crate::opcode::Opcode;
use crate::state::State;

/// clear
pub fn clr(_op: u16, state: &mut State) -> Result<()> {
    state.clear_screen();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State) -> Result<()> {
    let address = state.stack_pop()?;
    state.set_program_counter(address);
    Ok(())
}

/// call machine code at addr; not supported, so nothing happens
pub fn sys(_op: u16, _state: &mut State) -> Result<()> {
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State) -> Result<()> {
    state.set_program_counter(op.nnn());
    Ok(())
}

/// STACK.push(PC); PC = addr
/// PC already points past this instruction, so returning resumes after it
pub fn call(op: u16, state: &mut State) -> Result<()> {
    state.stack_push(state.program_counter())?;
    state.set_program_counter(op.nnn());
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut State) -> Result<()> {
    if state.reg_read(op.x())? == op.kk() {
        state.inc_program_counter();
    }
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut State) -> Result<()> {
    if state.reg_read(op.x())? != op.kk() {
        state.inc_program_counter();
    }
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut State) -> Result<()> {
    if state.reg_read(op.x())? == state.reg_read(op.y())? {
        state.inc_program_counter();
    }
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut State) -> Result<()> {
    state.reg_write(op.x(), op.kk())
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.reg_write(op.x(), vx.wrapping_add(op.kk()))
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State) -> Result<()> {
    let vy = state.reg_read(op.y())?;
    state.reg_write(op.x(), vy)
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    state.reg_write(op.x(), vx | vy)
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    state.reg_write(op.x(), vx & vy)
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    state.reg_write(op.x(), vx ^ vy)
}

// The flag-producing ALU ops below read both operands up front, then write VF,
// then Vx. When x is F the result overwrites the flag.

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    let (sum, carry) = vx.overflowing_add(vy);
    state.reg_write(FLAG_REGISTER, carry as u8)?;
    state.reg_write(op.x(), sum)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    let (difference, borrow) = vx.overflowing_sub(vy);
    state.reg_write(FLAG_REGISTER, !borrow as u8)?;
    state.reg_write(op.x(), difference)
}

/// Vx >>= 1; VF = shifted out lsb
pub fn shr(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.reg_write(FLAG_REGISTER, vx & 0x1)?;
    state.reg_write(op.x(), vx >> 1)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State) -> Result<()> {
    let (vx, vy) = (state.reg_read(op.x())?, state.reg_read(op.y())?);
    let (difference, borrow) = vy.overflowing_sub(vx);
    state.reg_write(FLAG_REGISTER, !borrow as u8)?;
    state.reg_write(op.x(), difference)
}

/// Vx <<= 1; VF = shifted out msb
pub fn shl(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.reg_write(FLAG_REGISTER, vx >> 7)?;
    state.reg_write(op.x(), vx << 1)
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &mut State) -> Result<()> {
    if state.reg_read(op.x())? != state.reg_read(op.y())? {
        state.inc_program_counter();
    }
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State) -> Result<()> {
    state.set_address_pointer(op.nnn());
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State) -> Result<()> {
    let v0 = state.reg_read(0x0)?;
    state.set_program_counter(op.nnn() + u16::from(v0));
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State) -> Result<()> {
    let rand_byte = state.random_byte();
    state.reg_write(op.x(), rand_byte & op.kk())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at I..I+n onto the FrameBuffer at (Vx, Vy), one byte
/// per row, msb leftmost. Coordinates wrap around the screen edges.
/// VF = 1 if any lit pixel was turned off, else 0
pub fn draw(op: u16, state: &mut State) -> Result<()> {
    let origin_x = usize::from(state.reg_read(op.x())?);
    let origin_y = usize::from(state.reg_read(op.y())?);
    let rows = usize::from(op.n());

    // DXY0 reads nothing, so I may point anywhere
    let mut sprite = [0; 0xF];
    if rows > 0 {
        sprite[..rows].copy_from_slice(state.mem_slice(usize::from(state.address_pointer()), rows)?);
    }

    let mut collision = 0x0;
    for (row, byte) in sprite[..rows].iter().enumerate() {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let index = y * DISPLAY_WIDTH + x;
            let sprite_bit = (byte >> (7 - bit)) & 0x1;
            let screen_bit = state.screen_read(index)?;
            collision |= sprite_bit & screen_bit;
            state.screen_write(index, screen_bit ^ sprite_bit)?;
        }
    }

    state.reg_write(FLAG_REGISTER, collision)
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut State) -> Result<()> {
    let key = state.reg_read(op.x())?;
    if state.key(key)? {
        state.inc_program_counter();
    }
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut State) -> Result<()> {
    let key = state.reg_read(op.x())?;
    if !state.key(key)? {
        state.inc_program_counter();
    }
    Ok(())
}

/// Vx = DT
/// An idle delay timer reads as expired
pub fn moved(op: u16, state: &mut State) -> Result<()> {
    let delay = state.delay_timer().get().unwrap_or(0);
    state.reg_write(op.x(), delay)
}

/// Vx = first pressed key
/// Returns false without touching anything if no key is held
pub fn keyd(op: u16, state: &mut State) -> Result<bool> {
    match state.first_pressed_key() {
        Some(key) => {
            state.reg_write(op.x(), key)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.set_delay_timer(vx);
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.set_sound_timer(vx);
    Ok(())
}

/// I += Vx
pub fn addi(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.set_address_pointer(state.address_pointer().wrapping_add(u16::from(vx)));
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET
pub fn ldspr(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    state.set_address_pointer(u16::from(vx) * GLYPH_SIZE);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds at I, tens at I+1, ones at I+2
pub fn bcd(op: u16, state: &mut State) -> Result<()> {
    let vx = state.reg_read(op.x())?;
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.load(usize::from(state.address_pointer()), &digits)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State) -> Result<()> {
    let count = usize::from(op.x()) + 1;
    let mut registers = [0; REGISTER_COUNT];
    registers[..count].copy_from_slice(&state.registers()[..count]);
    state.load(usize::from(state.address_pointer()), &registers[..count])
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State) -> Result<()> {
    let count = usize::from(op.x()) + 1;
    let mut values = [0; REGISTER_COUNT];
    values[..count].copy_from_slice(state.mem_slice(usize::from(state.address_pointer()), count)?);
    for (index, value) in values[..count].iter().enumerate() {
        state.reg_write(index as u8, *value)?;
    }
    Ok(())
}

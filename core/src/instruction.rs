use log::trace;

use crate::error::{Result, VmError};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Tag reported for words that decode to nothing; no real opcode uses it
pub const INVALID_TAG: u16 = 0xFFFF;

/// Every operation the engine knows, named after its encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0 CLS
    Cls,
    /// 00EE RET
    Ret,
    /// 0NNN SYS; ignored
    Sys,
    /// 1NNN JP addr
    Jp,
    /// 2NNN CALL addr
    Call,
    /// 3XKK SE Vx, byte
    Se,
    /// 4XKK SNE Vx, byte
    Sne,
    /// 5XY0 SE Vx, Vy
    SeReg,
    /// 6XKK LD Vx, byte
    Ld,
    /// 7XKK ADD Vx, byte
    Add,
    /// 8XY0 LD Vx, Vy
    Mov,
    /// 8XY1 OR Vx, Vy
    Or,
    /// 8XY2 AND Vx, Vy
    And,
    /// 8XY3 XOR Vx, Vy
    Xor,
    /// 8XY4 ADD Vx, Vy
    AddReg,
    /// 8XY5 SUB Vx, Vy
    Sub,
    /// 8XY6 SHR Vx
    Shr,
    /// 8XY7 SUBN Vx, Vy
    Subn,
    /// 8XYE SHL Vx
    Shl,
    /// 9XY0 SNE Vx, Vy
    SneReg,
    /// ANNN LD I, addr
    LdI,
    /// BNNN JP V0, addr
    JpV0,
    /// CXKK RND Vx, byte
    Rnd,
    /// DXYN DRW Vx, Vy, n
    Drw,
    /// EX9E SKP Vx
    Skp,
    /// EXA1 SKNP Vx
    Sknp,
    /// FX07 LD Vx, DT
    LdDelay,
    /// FX0A LD Vx, K
    LdKey,
    /// FX15 LD DT, Vx
    SetDelay,
    /// FX18 LD ST, Vx
    SetSound,
    /// FX1E ADD I, Vx
    AddI,
    /// FX29 LD F, Vx
    LdFont,
    /// FX33 LD B, Vx
    Bcd,
    /// FX55 LD [I], Vx
    Store,
    /// FX65 LD Vx, [I]
    Restore,
    Invalid,
}

/// How an executed instruction left the machine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Ran to completion; carries the canonical tag of what ran
    Done(u16),
    /// FX0A found no key held and changed nothing. Run the same word again
    /// once the host has polled input.
    Pending,
}

/// Selects the Instruction for an instruction word.
///
/// Only the high and low nibbles take part, plus the third nibble for the
/// F_5 group, so e.g. 0xF123 is BCD and 0xE19E / 0xE10E are both SKP.
/// Gaps in the 8, E and F families decode to `Invalid`; gaps in the 0 family
/// decode to `Sys`.
pub fn decode(op: u16) -> Instruction {
    use Instruction::*;

    match (op.high(), op.n()) {
        (0x0, 0x0) => Cls,
        (0x0, 0xE) => Ret,
        (0x0, _) => Sys,
        (0x1, _) => Jp,
        (0x2, _) => Call,
        (0x3, _) => Se,
        (0x4, _) => Sne,
        (0x5, _) => SeReg,
        (0x6, _) => Ld,
        (0x7, _) => Add,
        (0x8, 0x0) => Mov,
        (0x8, 0x1) => Or,
        (0x8, 0x2) => And,
        (0x8, 0x3) => Xor,
        (0x8, 0x4) => AddReg,
        (0x8, 0x5) => Sub,
        (0x8, 0x6) => Shr,
        (0x8, 0x7) => Subn,
        (0x8, 0xE) => Shl,
        (0x9, _) => SneReg,
        (0xA, _) => LdI,
        (0xB, _) => JpV0,
        (0xC, _) => Rnd,
        (0xD, _) => Drw,
        (0xE, 0x1) => Sknp,
        (0xE, 0xE) => Skp,
        (0xF, 0x3) => Bcd,
        (0xF, 0x5) => match op.y() {
            0x1 => SetDelay,
            0x5 => Store,
            0x6 => Restore,
            _ => Invalid,
        },
        (0xF, 0x7) => LdDelay,
        (0xF, 0x8) => SetSound,
        (0xF, 0x9) => LdFont,
        (0xF, 0xA) => LdKey,
        (0xF, 0xE) => AddI,
        _ => Invalid,
    }
}

impl Instruction {
    /// Canonical identifier for tracing and tests. The family nibble sits in
    /// the top position; sub-families keep their distinguishing low byte.
    pub fn tag(self) -> u16 {
        use Instruction::*;

        match self {
            Cls => 0x00E0,
            Ret => 0x00EE,
            Sys => 0x0000,
            Jp => 0x1000,
            Call => 0x2000,
            Se => 0x3000,
            Sne => 0x4000,
            SeReg => 0x5000,
            Ld => 0x6000,
            Add => 0x7000,
            Mov => 0x8000,
            Or => 0x8001,
            And => 0x8002,
            Xor => 0x8003,
            AddReg => 0x8004,
            Sub => 0x8005,
            Shr => 0x8006,
            Subn => 0x8007,
            Shl => 0x800E,
            SneReg => 0x9000,
            LdI => 0xA000,
            JpV0 => 0xB000,
            Rnd => 0xC000,
            Drw => 0xD000,
            Skp => 0xE09E,
            Sknp => 0xE0A1,
            LdDelay => 0xF007,
            LdKey => 0xF00A,
            SetDelay => 0xF015,
            SetSound => 0xF018,
            AddI => 0xF01E,
            LdFont => 0xF029,
            Bcd => 0xF033,
            Store => 0xF055,
            Restore => 0xF065,
            Invalid => INVALID_TAG,
        }
    }
}

/// Decodes `op` and applies it to `state`.
///
/// The program counter is expected to already point past `op`; only jumps,
/// calls, returns and taken skips move it here. On `Err` the state is left
/// exactly as it was.
pub fn execute(op: u16, state: &mut State) -> Result<Status> {
    use Instruction::*;

    let instruction = decode(op);
    trace!(
        "{:04X} {:?} pc{:04X} i{:04X} v{:02X?}",
        op,
        instruction,
        state.program_counter(),
        state.address_pointer(),
        state.registers()
    );

    let applied = match instruction {
        Cls => clr(op, state),
        Ret => rts(op, state),
        Sys => sys(op, state),
        Jp => jump(op, state),
        Call => call(op, state),
        Se => ske(op, state),
        Sne => skne(op, state),
        SeReg => skre(op, state),
        Ld => load(op, state),
        Add => add(op, state),
        Mov => mv(op, state),
        Or => or(op, state),
        And => and(op, state),
        Xor => xor(op, state),
        AddReg => addr(op, state),
        Sub => sub(op, state),
        Shr => shr(op, state),
        Subn => subn(op, state),
        Shl => shl(op, state),
        SneReg => skrne(op, state),
        LdI => loadi(op, state),
        JpV0 => jumpi(op, state),
        Rnd => rand(op, state),
        Drw => draw(op, state),
        Skp => skpr(op, state),
        Sknp => skup(op, state),
        LdDelay => moved(op, state),
        LdKey => {
            if !keyd(op, state)? {
                return Ok(Status::Pending);
            }
            Ok(())
        }
        SetDelay => loads(op, state),
        SetSound => ld(op, state),
        AddI => addi(op, state),
        LdFont => ldspr(op, state),
        Bcd => bcd(op, state),
        Store => stor(op, state),
        Restore => read(op, state),
        Invalid => return Err(VmError::InvalidOpcode { opcode: op }),
    };
    applied?;

    Ok(Status::Done(instruction.tag()))
}

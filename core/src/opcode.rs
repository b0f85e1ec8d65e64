/// # Opcodes
///
/// Instructions are 16-bit big-endian words, read as four nibbles `(h, x, y, n)`.
/// The high nibble picks the instruction family. Some families overload the low
/// nibble (and the `F_5` group also the third nibble) to pick among operations
/// that share an operand layout.
///
/// Operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an immediate byte
/// - `[_x__]` register Vx, or the upper bound of the range V0..=Vx
/// - `[__y_]` register Vy
/// - `[___n]` sprite height for draws
pub trait Opcode {
    /// `[h___]`
    fn high(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn high(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes at PC and PC+1 into an instruction word.
pub fn fetch(hi: u8, lo: u8) -> u16 {
    u16::from(hi) << 8 | u16::from(lo)
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_operands() {
        let op: u16 = 0xD7A3;
        assert_eq!(op.high(), 0xD);
        assert_eq!(op.x(), 0x7);
        assert_eq!(op.y(), 0xA);
        assert_eq!(op.n(), 0x3);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0x6C2F;
        assert_eq!(op.kk(), 0x2F);
    }

    #[test]
    fn test_nnn() {
        let op: u16 = 0x2ABC;
        assert_eq!(op.nnn(), 0x0ABC);
    }

    #[test]
    fn test_fetch_is_big_endian() {
        assert_eq!(fetch(0x00, 0xE0), 0x00E0);
        assert_eq!(fetch(0xF1, 0x0A), 0xF10A);
    }
}

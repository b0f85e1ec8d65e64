use thiserror::Error;

/// Faults the machine reports back to the host.
///
/// None of these are fatal; the host decides whether to halt, skip the
/// instruction, or surface the problem.
#[derive(Debug, Error)]
pub enum VmError {
    #[error("invalid opcode {opcode:#06X}")]
    InvalidOpcode { opcode: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("stack overflow: call with all {depth} return slots in use")]
    StackOverflow { depth: usize },

    #[error("memory access out of range at {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("no register V{index:X}")]
    RegisterOutOfRange { index: u8 },

    #[error("pixel {index} is outside the framebuffer")]
    PixelOutOfRange { index: usize },

    #[error("no key {key:#04X} on the keypad")]
    KeyOutOfRange { key: u8 },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("failed to read ROM: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VmError>;

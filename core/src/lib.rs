pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::{Result, VmError};
pub use instruction::{decode, execute, Instruction, Status, INVALID_TAG};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
mod operations;
pub mod state;

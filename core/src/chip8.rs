use log::{debug, warn};

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{Result, VmError};
use crate::instruction::{execute, Status};
use crate::opcode::fetch;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// The machine as a host sees it.
///
/// Tracks the current `state` and whether the last step stalled on a key wait.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - ticking its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    waiting_for_key: bool,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::from_state(State::new())
    }

    /// A machine whose random draws repeat from run to run
    pub fn with_seed(seed: u64) -> Self {
        Chip8::from_state(State::with_seed(seed))
    }

    fn from_state(state: State) -> Self {
        Chip8 {
            state,
            waiting_for_key: false,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    ///
    /// Returns the number of bytes loaded at 0x200.
    pub fn load_rom(&mut self, reader: &mut dyn std::io::Read) -> Result<usize> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(VmError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.state.load(usize::from(PROGRAM_START), &rom)?;
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Returns the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.take_draw_flag() {
            Some(*self.state.frame_buffer())
        } else {
            None
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.state.frame_buffer()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit 0x0..0xF of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.state.set_key(key)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex digit 0x0..0xF of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.state.clear_key(key)
    }

    /// Advances the CPU by a single instruction
    /// - fetches the word at the pc and moves the pc past it
    /// - executes it
    /// - rewinds the pc if the instruction is waiting for a key or failed, so
    ///   it runs again next time (or can be inspected) with nothing changed
    pub fn advance_cpu(&mut self) -> Result<Status> {
        let pc = self.state.program_counter();
        let op = self.get_op()?;
        self.state.inc_program_counter();

        match execute(op, &mut self.state) {
            Ok(Status::Pending) => {
                if !self.waiting_for_key {
                    debug!("{:04X} at {:#05X} waiting for a key", op, pc);
                }
                self.waiting_for_key = true;
                self.state.set_program_counter(pc);
                Ok(Status::Pending)
            }
            Ok(done) => {
                self.waiting_for_key = false;
                Ok(done)
            }
            Err(e) => {
                warn!("{:04X} at {:#05X} faulted: {}", op, pc, e);
                self.state.set_program_counter(pc);
                Err(e)
            }
        }
    }

    /// Decrements the delay and sound timers; call at `TIMER_HZ`
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Whether the sound timer is running, i.e. the host should be beeping
    pub fn is_beeping(&self) -> bool {
        self.state.sound_timer().is_active()
    }

    /// Whether the last step stalled on FX0A
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16> {
        let pc = usize::from(self.state.program_counter());
        let word = self.state.mem_slice(pc, 2)?;
        Ok(fetch(word[0], word[1]))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

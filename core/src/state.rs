use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SCREEN_SIZE, SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::{Result, VmError};

/// The FrameBuffer is indexed as [y][x]; every cell is 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Timer
/// An 8-bit countdown decremented by the host at 60Hz.
///
/// Starts idle (`None`) until the program first sets it, so hosts can tell
/// "never armed" apart from "ran out".
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer(Option<u8>);

impl Timer {
    pub fn get(self) -> Option<u8> {
        self.0
    }

    pub fn set(&mut self, value: u8) {
        self.0 = Some(value);
    }

    /// Counts down by one, stopping at 0. Idle timers stay idle.
    pub fn tick(&mut self) {
        if let Some(value) = self.0.as_mut() {
            *value = value.saturating_sub(1);
        }
    }

    /// Non-zero; for the sound timer this is the "beep" line
    pub fn is_active(self) -> bool {
        matches!(self.0, Some(value) if value > 0)
    }
}

/// # Machine State
/// Everything an instruction can read or write.
///
/// ## CPU
/// Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the flag register
/// - (i) a 16-bit index pointer used as the base of memory operations
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - 16 return addresses plus a stack pointer
///
/// Timers
/// - delay and sound, see [`Timer`]
///
/// ## Memory
/// - 4096 bytes; 0x000..0x050 holds the hex font
/// - a 64x32 monochrome frame buffer
///
/// ## Input
/// - 16 key lines, one per hex digit
///
/// Fields are only reachable through the accessors below, which bounds-check
/// every index and report violations as [`VmError`]s.
#[derive(Clone)]
pub struct State {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    sp: usize,
    stack: [u16; STACK_DEPTH],
    memory: [u8; MEMORY_SIZE],
    frame_buffer: FrameBuffer,
    draw_flag: bool,
    keys: [bool; KEY_COUNT],
    delay_timer: Timer,
    sound_timer: Timer,
    rng: StdRng,
}

impl State {
    /// A fresh machine with its random generator seeded from the OS
    pub fn new() -> Self {
        State::from_rng(StdRng::from_entropy())
    }

    /// A fresh machine whose random draws are reproducible
    pub fn with_seed(seed: u64) -> Self {
        State::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keys: [false; KEY_COUNT],
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            rng,
        }
    }

    // Main memory

    pub fn mem_read(&self, address: usize) -> Result<u8> {
        self.memory
            .get(address)
            .copied()
            .ok_or(VmError::AddressOutOfRange { address })
    }

    pub fn mem_write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .memory
            .get_mut(address)
            .ok_or(VmError::AddressOutOfRange { address })?;
        *cell = value;
        Ok(())
    }

    /// Borrows `len` bytes starting at `address`, failing if any of them
    /// fall outside memory.
    pub fn mem_slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        Self::check_range(address, len)?;
        Ok(&self.memory[address..address + len])
    }

    /// Copies `bytes` into memory at `address`; nothing is written unless
    /// all of it fits.
    pub fn load(&mut self, address: usize, bytes: &[u8]) -> Result<()> {
        Self::check_range(address, bytes.len())?;
        self.memory[address..address + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn check_range(address: usize, len: usize) -> Result<()> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(()),
            _ => Err(VmError::AddressOutOfRange {
                address: address.max(MEMORY_SIZE),
            }),
        }
    }

    // Registers

    pub fn reg_read(&self, index: u8) -> Result<u8> {
        self.v
            .get(usize::from(index))
            .copied()
            .ok_or(VmError::RegisterOutOfRange { index })
    }

    pub fn reg_write(&mut self, index: u8, value: u8) -> Result<()> {
        let register = self
            .v
            .get_mut(usize::from(index))
            .ok_or(VmError::RegisterOutOfRange { index })?;
        *register = value;
        Ok(())
    }

    /// V0..VF
    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    // Screen

    /// Reads pixel `index`, counted row-major from the top left
    pub fn screen_read(&self, index: usize) -> Result<u8> {
        if index >= SCREEN_SIZE {
            return Err(VmError::PixelOutOfRange { index });
        }
        Ok(self.frame_buffer[index / DISPLAY_WIDTH][index % DISPLAY_WIDTH])
    }

    /// Writes pixel `index`; only the low bit of `value` is kept
    pub fn screen_write(&mut self, index: usize, value: u8) -> Result<()> {
        if index >= SCREEN_SIZE {
            return Err(VmError::PixelOutOfRange { index });
        }
        self.frame_buffer[index / DISPLAY_WIDTH][index % DISPLAY_WIDTH] = value & 0x1;
        self.draw_flag = true;
        Ok(())
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Whether the frame buffer changed since the flag was last taken
    pub fn draw_flag(&self) -> bool {
        self.draw_flag
    }

    pub fn take_draw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.draw_flag, false)
    }

    // Pointers

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    pub fn set_program_counter(&mut self, address: u16) {
        self.pc = address;
    }

    /// Moves past one instruction
    pub fn inc_program_counter(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn address_pointer(&self) -> u16 {
        self.i
    }

    pub fn set_address_pointer(&mut self, address: u16) {
        self.i = address;
    }

    // Stack

    pub fn stack_push(&mut self, address: u16) -> Result<()> {
        if self.sp == STACK_DEPTH {
            return Err(VmError::StackOverflow { depth: STACK_DEPTH });
        }
        self.stack[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn stack_pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(VmError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub fn stack_peek(&self) -> Option<u16> {
        self.sp.checked_sub(1).map(|top| self.stack[top])
    }

    pub fn stack_depth(&self) -> usize {
        self.sp
    }

    // Timers

    pub fn delay_timer(&self) -> Timer {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer.set(value);
    }

    pub fn sound_timer(&self) -> Timer {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer.set(value);
    }

    /// One 60Hz tick of both timers
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
    }

    // Keypad

    pub fn key(&self, key: u8) -> Result<bool> {
        self.keys
            .get(usize::from(key))
            .copied()
            .ok_or(VmError::KeyOutOfRange { key })
    }

    pub fn set_key(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = true;
        Ok(())
    }

    pub fn clear_key(&mut self, key: u8) -> Result<()> {
        *self.key_mut(key)? = false;
        Ok(())
    }

    pub fn toggle_key(&mut self, key: u8) -> Result<()> {
        let line = self.key_mut(key)?;
        *line = !*line;
        Ok(())
    }

    /// Lowest-numbered key currently held down
    pub fn first_pressed_key(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }

    fn key_mut(&mut self, key: u8) -> Result<&mut bool> {
        self.keys
            .get_mut(usize::from(key))
            .ok_or(VmError::KeyOutOfRange { key })
    }

    // Randomness

    /// Uniform over 0..=255; the generator is seeded once per machine
    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;

use hex8_core::constants::TIMER_HZ;
use hex8_core::Chip8;

/// Whether this build can open a window
pub const WINDOWED: bool = cfg!(feature = "sdl");

/// Keeps the CPU at its configured rate and works out when the 60Hz timers
/// are due.
///
/// Timer ticks are counted in emulated time (instructions executed × cycle
/// time), so fast-forwarding speeds the timers up with the program.
pub struct Pacer {
    cycle_time: Duration,
    timer_time: Duration,
    owed: Duration,
    last_cycle: Instant,
}

impl Pacer {
    pub fn new(cycle_time: Duration) -> Self {
        Pacer {
            cycle_time,
            timer_time: Duration::from_nanos(1_000_000_000 / TIMER_HZ),
            owed: Duration::ZERO,
            last_cycle: Instant::now(),
        }
    }

    /// Accounts for one executed instruction, returning the timer ticks that
    /// fell due during it.
    pub fn cycle(&mut self) -> u32 {
        self.owed += self.cycle_time;
        let mut ticks = 0;
        while self.owed >= self.timer_time {
            self.owed -= self.timer_time;
            ticks += 1;
        }
        ticks
    }

    /// Sleeps off whatever is left of the current cycle
    pub fn throttle(&mut self) {
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - self.last_cycle;
        if self.cycle_time > elapsed_cycle_time {
            std::thread::sleep(self.cycle_time - elapsed_cycle_time);
        }
        self.last_cycle = Instant::now();
    }
}

/// Runs one instruction and any timer ticks it makes due
fn step(chip8: &mut Chip8, pacer: &mut Pacer) -> Result<()> {
    let pc = chip8.state().program_counter();
    chip8
        .advance_cpu()
        .with_context(|| format!("machine halted at {:#05X}", pc))?;
    for _ in 0..pacer.cycle() {
        chip8.tick_timers();
    }
    Ok(())
}

/// Runs `cycles` instructions with no display or input.
pub fn headless(chip8: &mut Chip8, cycle_time: Duration, cycles: u64, fast: bool) -> Result<()> {
    let mut pacer = Pacer::new(cycle_time);
    for _ in 0..cycles {
        step(chip8, &mut pacer)?;
        if !fast {
            pacer.throttle();
        }
    }
    if chip8.is_waiting_for_key() {
        info!("stopped while waiting for a key press");
    }
    Ok(())
}

#[cfg(feature = "sdl")]
pub fn windowed(chip8: &mut Chip8, cycle_time: Duration) -> Result<()> {
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;

    use crate::display::Display;
    use crate::keymap::keymap;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let mut pacer = Pacer::new(cycle_time);

    // Whether or not the configured clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // Render the frame if anything was drawn since the last one
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame)?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc)?,
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc)?,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        step(chip8, &mut pacer)?;

        if !fast_forward {
            pacer.throttle();
        }
    }
    Ok(())
}

#[cfg(not(feature = "sdl"))]
pub fn windowed(_chip8: &mut Chip8, _cycle_time: Duration) -> Result<()> {
    anyhow::bail!("windowed mode needs the `sdl` feature")
}

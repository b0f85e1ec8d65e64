use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use hex8_core::{Chip8, CLOCK_SPEED};

#[cfg(feature = "sdl")]
mod display;
#[cfg(feature = "sdl")]
mod keymap;
mod run;
mod text;

/// Fastest clock that still leaves a nonzero cycle time
const MAX_HZ: u64 = 1_000_000_000;

/// Hex8 virtual machine runner
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// ROM to load and execute
    rom: PathBuf,

    /// Instructions executed per second
    #[clap(
        long,
        default_value_t = MAX_HZ / CLOCK_SPEED,
        value_parser = clap::value_parser!(u64).range(1..=MAX_HZ)
    )]
    hz: u64,

    /// Run without a window and print the final frame as text
    #[clap(long)]
    headless: bool,

    /// Instructions to execute before stopping in headless mode
    #[clap(long, default_value_t = 10_000)]
    cycles: u64,

    /// Don't sleep between instructions in headless mode
    #[clap(long)]
    fast: bool,

    /// Seed for the random number generator, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default()
        .filter_or("HEX8_LOG", "info")
        .write_style_or("HEX8_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let args = Args::parse();
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    let file = File::open(&args.rom).with_context(|| format!("failed to open {:?}", args.rom))?;
    let size = chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("failed to load {:?}", args.rom))?;
    info!("loaded {} byte ROM from {:?}", size, args.rom);

    let cycle_time = Duration::from_nanos(MAX_HZ / args.hz);

    if args.headless || !run::WINDOWED {
        if !args.headless {
            warn!("built without the `sdl` feature; running headless");
        }
        run::headless(&mut chip8, cycle_time, args.cycles, args.fast)?;
        print!("{}", text::render(chip8.frame()));
        Ok(())
    } else {
        run::windowed(&mut chip8, cycle_time)
    }
}

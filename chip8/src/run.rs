use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{error, info};

use chipvm::{Chip8, Config};

use crate::frontend::SdlFrontend;

/// Loads `rom` and runs it in an SDL2 window until the window is closed
pub fn run(
    rom: &Path,
    config: Config,
    scale: u32,
    seed: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let mut chip8 = match seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    let file = File::open(rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom_from(&mut reader)?;
    info!("running {}", rom.display());

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut frontend = SdlFrontend::new(&sdl, scale)?;

    if let Err(e) = chipvm::run(&mut chip8, &mut frontend, config) {
        error!("{}", e);
        return Err(e.into());
    }
    Ok(())
}

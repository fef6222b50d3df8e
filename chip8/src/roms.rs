use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chipvm::constants::PROGRAM_START;
use chipvm::decode;

const ROM_EXTENSION: &str = "ch8";

/// The ROM files in `dir`, sorted by name
pub fn list(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut roms = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == ROM_EXTENSION) {
            roms.push(path);
        }
    }
    roms.sort();
    Ok(roms)
}

/// One line per instruction word: address, word and assembly text.
/// A trailing odd byte is shown as a word padded with 0.
pub fn disassemble(rom: &[u8]) -> Vec<String> {
    rom.chunks(2)
        .zip((PROGRAM_START..).step_by(2))
        .map(|(bytes, address)| {
            let op = u16::from(bytes[0]) << 8 | u16::from(*bytes.get(1).unwrap_or(&0));
            format!("{:03X}  {:04X}  {}", address, op, decode(op))
        })
        .collect()
}

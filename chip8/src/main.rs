use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use chipvm::Config;

mod frontend;
mod keymap;
mod roms;
mod run;

/// Run a program on the 8-bit virtual machine
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("action").required(true).args(["rom", "list", "disassemble"])))]
struct Args {
    /// ROM to load and run
    #[arg(short, long)]
    rom: Option<PathBuf>,

    /// List the ROMs in a directory
    #[arg(short, long, value_name = "DIR")]
    list: Option<PathBuf>,

    /// Print the instructions of a ROM
    #[arg(short, long, value_name = "ROM")]
    disassemble: Option<PathBuf>,

    /// Time budget of a single cycle in microseconds
    #[arg(long, default_value_t = 2000)]
    cycle_micros: u64,

    /// Window pixels per display pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Log more; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    SimpleLogger::new().with_level(log_level(args.verbose)).init()?;

    if let Some(dir) = args.list {
        for rom in roms::list(&dir)? {
            println!("{}", rom.display());
        }
    } else if let Some(rom) = args.disassemble {
        for line in roms::disassemble(&fs::read(rom)?) {
            println!("{}", line);
        }
    } else if let Some(rom) = args.rom {
        let config = Config {
            cycle_time: Duration::from_micros(args.cycle_micros),
            ..Config::default()
        };
        run::run(&rom, config, args.scale, args.seed)?;
    }

    Ok(())
}

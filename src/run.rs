use std::time::{Duration, Instant};

use log::{debug, info};

use crate::chip8::Chip8;
use crate::constants::{CYCLE_TIME, TIMER_PERIOD};
use crate::error::Result;
use crate::keypad::Keypad;
use crate::state::FrameBuffer;
use crate::timers::{Buzzer, TimerClock};

/// What the frontend wants the loop to do after polling input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// # Frontend
/// Everything the run loop needs from the outside world.
///
/// The loop calls `poll_input` and `render` exactly once per iteration, including while
/// the CPU is waiting for a key.
pub trait Frontend {
    /// Present the current frame
    fn render(&mut self, frame: &FrameBuffer);

    /// Press and release keys on `keypad` and report whether to stop
    fn poll_input(&mut self, keypad: &mut Keypad) -> Control;

    /// The sound timer was set above 0
    fn buzz_start(&mut self) {}

    /// The sound timer reached 0
    fn buzz_stop(&mut self) {}
}

/// Timing of the run loop
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Time budget for one iteration; the loop sleeps off whatever is left
    pub cycle_time: Duration,
    /// Wall time between timer decrements
    pub timer_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cycle_time: CYCLE_TIME,
            timer_period: TIMER_PERIOD,
        }
    }
}

/// Runs `chip8` until the frontend asks to quit or an instruction fails.
///
/// Each iteration:
/// - executes one instruction unless waiting for a key
/// - polls input and renders the frame
/// - decrements the timers once for every timer period that has passed
/// - resolves a pending key wait
/// - sleeps for the rest of the cycle time
pub fn run(chip8: &mut Chip8, frontend: &mut dyn Frontend, config: Config) -> Result<()> {
    info!(
        "starting [cycle: {:?}, timer period: {:?}]",
        config.cycle_time, config.timer_period
    );

    let mut clock = TimerClock::new(config.timer_period);
    let mut last_tick = Instant::now();
    let mut buzzing = false;

    loop {
        let start = Instant::now();

        chip8.advance_cpu()?;
        let sounding = chip8.state().timers.sound > 0;
        sync_buzzer(frontend, &mut buzzing, sounding);

        let control = frontend.poll_input(chip8.keypad_mut());
        frontend.render(chip8.frame());

        let now = Instant::now();
        for _ in 0..clock.advance(now - last_tick) {
            if chip8.advance_timers() == Buzzer::Stopped {
                sync_buzzer(frontend, &mut buzzing, false);
            }
        }
        last_tick = now;

        chip8.check_key_wait();

        if control == Control::Quit {
            info!("quit requested");
            return Ok(());
        }

        let elapsed = start.elapsed();
        if config.cycle_time > elapsed {
            std::thread::sleep(config.cycle_time - elapsed);
        }
    }
}

/// Starts or stops the buzzer when the sound timer crosses 0
fn sync_buzzer(frontend: &mut dyn Frontend, buzzing: &mut bool, sounding: bool) {
    if sounding == *buzzing {
        return;
    }
    if sounding {
        debug!("buzzer on");
        frontend.buzz_start();
    } else {
        debug!("buzzer off");
        frontend.buzz_stop();
    }
    *buzzing = sounding;
}

use std::time::Duration;

/// What happened to the buzzer during a timer tick
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Buzzer {
    /// The sound timer is still counting down
    Sounding,
    /// The sound timer just reached 0
    Stopped,
    Silent,
}

/// # Timers
/// - 2 8-bit timers (delay & sound)
/// - both count down to 0 at 60Hz and stay there
/// - the buzzer sounds while the sound timer is above 0
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers once
    pub fn tick(&mut self) -> Buzzer {
        self.delay = self.delay.saturating_sub(1);

        match self.sound {
            0 => Buzzer::Silent,
            1 => {
                self.sound = 0;
                Buzzer::Stopped
            }
            _ => {
                self.sound -= 1;
                Buzzer::Sounding
            }
        }
    }
}

/// Accumulates wall time and converts it into timer ticks, independently of how
/// often the CPU is advanced.
#[derive(Copy, Clone, Debug)]
pub struct TimerClock {
    period: Duration,
    elapsed: Duration,
}

impl TimerClock {
    pub fn new(period: Duration) -> Self {
        TimerClock {
            period,
            elapsed: Duration::ZERO,
        }
    }

    /// Adds `delta` of wall time and returns how many ticks are now due
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.elapsed += delta;
        let mut ticks = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            ticks += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_stop_at_zero() {
        let mut timers = Timers::default();
        assert_eq!(timers.tick(), Buzzer::Silent);
        assert_eq!(timers.delay, 0);
        assert_eq!(timers.sound, 0);
    }

    #[test]
    fn test_sound_timer_reports_stop_once() {
        let mut timers = Timers { delay: 3, sound: 2 };
        assert_eq!(timers.tick(), Buzzer::Sounding);
        assert_eq!(timers.tick(), Buzzer::Stopped);
        assert_eq!(timers.tick(), Buzzer::Silent);
        assert_eq!(timers.delay, 0);
    }

    #[test]
    fn test_clock_accumulates_partial_periods() {
        let mut clock = TimerClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(6)), 0);
        assert_eq!(clock.advance(Duration::from_millis(6)), 1);
        assert_eq!(clock.advance(Duration::from_millis(28)), 3);
    }

    #[test]
    fn test_zero_period_never_ticks() {
        let mut clock = TimerClock::new(Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_secs(1)), 0);
    }
}

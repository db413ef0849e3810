use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running { started_at: Instant },
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Timer not running; nothing changed.
    Inactive,
    Running { time_left: u32 },
    /// Reported on the single tick that reaches zero. The timer is stopped
    /// by then, so later ticks are `Inactive`.
    Expired,
}

/// Countdown over a fixed duration. Remaining time is always derived from
/// the wall-clock delta since start, never from how many ticks arrived.
#[derive(Clone, Debug)]
pub struct SessionTimer {
    duration_secs: u32,
    time_left: u32,
    state: TimerState,
}

impl SessionTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            time_left: duration_secs,
            state: TimerState::Idle,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Returns false if the timer was already started or stopped.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Running { started_at: now };
        true
    }

    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Tick {
        let TimerState::Running { started_at } = self.state else {
            return Tick::Inactive;
        };

        let elapsed_secs = now.saturating_duration_since(started_at).as_millis() / 1000;
        let elapsed_secs = u32::try_from(elapsed_secs).unwrap_or(u32::MAX);
        self.time_left = self.duration_secs.saturating_sub(elapsed_secs);

        if self.time_left == 0 {
            self.stop();
            Tick::Expired
        } else {
            Tick::Running {
                time_left: self.time_left,
            }
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.tick_at(Instant::now())
    }

    /// Stops ticking for good. Returns true only for the call that actually
    /// stopped a live (or never started) timer.
    pub fn stop(&mut self) -> bool {
        if self.state == TimerState::Stopped {
            return false;
        }
        self.state = TimerState::Stopped;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn idle_timer_ignores_ticks() {
        let mut timer = SessionTimer::new(15);
        assert_eq!(timer.tick(), Tick::Inactive);
        assert_eq!(timer.time_left(), 15);
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn time_left_comes_from_elapsed_wall_clock() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::new(15);
        assert!(timer.start_at(t0));

        assert_eq!(
            timer.tick_at(t0 + Duration::from_millis(999)),
            Tick::Running { time_left: 15 }
        );
        assert_eq!(
            timer.tick_at(t0 + Duration::from_millis(1000)),
            Tick::Running { time_left: 14 }
        );
        // A long stall between ticks is not "lost" time.
        assert_eq!(
            timer.tick_at(t0 + Duration::from_millis(9_500)),
            Tick::Running { time_left: 6 }
        );
    }

    #[test]
    fn expires_exactly_once() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::new(15);
        timer.start_at(t0);

        assert_eq!(timer.tick_at(t0 + Duration::from_millis(15_000)), Tick::Expired);
        assert_eq!(timer.time_left(), 0);
        assert_eq!(timer.state(), TimerState::Stopped);

        assert_eq!(timer.tick_at(t0 + Duration::from_millis(16_000)), Tick::Inactive);
        assert_eq!(timer.tick_at(t0 + Duration::from_millis(60_000)), Tick::Inactive);
    }

    #[test]
    fn overdue_tick_clamps_to_zero() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::new(15);
        timer.start_at(t0);
        assert_eq!(timer.tick_at(t0 + Duration::from_secs(120)), Tick::Expired);
        assert_eq!(timer.time_left(), 0);
    }

    #[test]
    fn start_is_idempotent() {
        let t0 = Instant::now();
        let mut timer = SessionTimer::new(30);
        assert!(timer.start_at(t0));
        assert!(!timer.start_at(t0 + Duration::from_secs(5)));
        // Still measured from the first start.
        assert_eq!(
            timer.tick_at(t0 + Duration::from_secs(10)),
            Tick::Running { time_left: 20 }
        );
    }

    #[test]
    fn stop_reports_only_first_call() {
        let mut timer = SessionTimer::new(30);
        timer.start();
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.start());
        assert_eq!(timer.tick(), Tick::Inactive);
    }
}

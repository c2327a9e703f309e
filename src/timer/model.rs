//! Single countdown state and phase derivation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TimerError;

/// Length of every timer created by the controller
pub const TIMER_DURATION: Duration = Duration::from_secs(40 * 60);

/// Lifecycle of a countdown. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Paused,
    Finished,
}

/// Urgency band derived from the remaining share of the total duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Green,
    Orange,
    Red,
    Done,
}

/// One named countdown
#[derive(Debug)]
pub struct Timer {
    name: String,
    total: Duration,
    remaining: Duration,
    status: TimerStatus,
}

impl Timer {
    /// Create a running timer of the standard duration
    pub fn new(name: &str) -> Result<Self, TimerError> {
        Self::with_duration(name, TIMER_DURATION)
    }

    /// Create a running timer counting down from `total`
    pub fn with_duration(name: &str, total: Duration) -> Result<Self, TimerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimerError::InvalidName);
        }

        // A zero-length timer is born finished to keep status tied to remaining.
        let status = if total.is_zero() {
            TimerStatus::Finished
        } else {
            TimerStatus::Running
        };

        Ok(Self {
            name: name.to_string(),
            total,
            remaining: total,
            status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == TimerStatus::Finished
    }

    /// Advance the countdown by `elapsed`. Only running timers move.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.status != TimerStatus::Running {
            return;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.status = TimerStatus::Finished;
        }
    }

    pub fn pause(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
        }
    }

    /// Flip between running and paused; finished timers stay finished
    pub fn toggle(&mut self) {
        match self.status {
            TimerStatus::Running => self.pause(),
            TimerStatus::Paused => self.resume(),
            TimerStatus::Finished => {}
        }
    }

    /// Phase in thirds of the total duration.
    ///
    /// Each band includes its upper bound: with a 40 minute timer, 26:40 left
    /// is already orange and 13:20 left is already red.
    pub fn phase(&self) -> Phase {
        // u128 nanoseconds cannot overflow here, even for Duration::MAX.
        let remaining = self.remaining.as_nanos() * 3;
        let total = self.total.as_nanos();
        if self.remaining.is_zero() {
            Phase::Done
        } else if remaining > total * 2 {
            Phase::Green
        } else if remaining > total {
            Phase::Orange
        } else {
            Phase::Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer_with_remaining(total: u64, remaining: u64) -> Timer {
        let mut timer = Timer::with_duration("sample", Duration::from_secs(total)).unwrap();
        timer.tick(Duration::from_secs(total - remaining));
        timer
    }

    #[test]
    fn new_timer_starts_running_at_full_duration() {
        let timer = Timer::new("  Focus ").unwrap();
        assert_eq!(timer.name(), "Focus");
        assert_eq!(timer.remaining(), TIMER_DURATION);
        assert_eq!(timer.total(), TIMER_DURATION);
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.phase(), Phase::Green);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(Timer::new("").unwrap_err(), TimerError::InvalidName);
        assert_eq!(Timer::new(" \t\n").unwrap_err(), TimerError::InvalidName);
    }

    #[test]
    fn phase_boundaries_for_forty_minutes() {
        let cases = [
            (1601, Phase::Green),
            (1600, Phase::Orange),
            (801, Phase::Orange),
            (800, Phase::Red),
            (1, Phase::Red),
            (0, Phase::Done),
        ];
        for (remaining, expected) in cases {
            let timer = timer_with_remaining(2400, remaining);
            assert_eq!(timer.phase(), expected, "remaining={remaining}s");
        }
    }

    #[test]
    fn phase_thresholds_follow_total_duration() {
        assert_eq!(timer_with_remaining(90, 61).phase(), Phase::Green);
        assert_eq!(timer_with_remaining(90, 60).phase(), Phase::Orange);
        assert_eq!(timer_with_remaining(90, 31).phase(), Phase::Orange);
        assert_eq!(timer_with_remaining(90, 30).phase(), Phase::Red);
    }

    #[test]
    fn phase_handles_the_largest_duration() {
        let mut timer = Timer::with_duration("long", Duration::MAX).unwrap();
        assert_eq!(timer.phase(), Phase::Green);
        timer.tick(Duration::MAX / 3 * 2);
        assert_eq!(timer.phase(), Phase::Red);
        timer.tick(Duration::MAX);
        assert_eq!(timer.phase(), Phase::Done);
    }

    #[test]
    fn sub_second_remainder_is_not_done() {
        let mut timer = Timer::with_duration("sample", Duration::from_secs(3)).unwrap();
        timer.tick(Duration::from_millis(2_600));
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.phase(), Phase::Red);
    }

    #[test]
    fn tick_clamps_at_zero_and_finishes() {
        let mut timer = Timer::new("Focus").unwrap();
        timer.tick(TIMER_DURATION + Duration::from_secs(90));
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.status(), TimerStatus::Finished);
        assert_eq!(timer.phase(), Phase::Done);
    }

    #[test]
    fn paused_timer_ignores_ticks_until_resumed() {
        let mut timer = Timer::new("Focus").unwrap();
        timer.tick(Duration::from_secs(10));
        timer.pause();
        for _ in 0..5 {
            timer.tick(Duration::from_secs(60));
        }
        assert_eq!(timer.remaining(), TIMER_DURATION - Duration::from_secs(10));

        timer.resume();
        timer.tick(Duration::from_secs(5));
        assert_eq!(timer.remaining(), TIMER_DURATION - Duration::from_secs(15));
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut timer = Timer::new("Focus").unwrap();
        timer.pause();
        timer.pause();
        assert_eq!(timer.status(), TimerStatus::Paused);
        timer.resume();
        timer.resume();
        assert_eq!(timer.status(), TimerStatus::Running);
    }

    #[test]
    fn finished_is_absorbing() {
        let mut timer = Timer::new("Focus").unwrap();
        timer.tick(TIMER_DURATION);
        timer.pause();
        assert_eq!(timer.status(), TimerStatus::Finished);
        timer.resume();
        timer.toggle();
        timer.tick(Duration::from_secs(1));
        assert_eq!(timer.status(), TimerStatus::Finished);
        assert_eq!(timer.remaining(), Duration::ZERO);
    }

    #[test]
    fn toggle_flips_running_and_paused() {
        let mut timer = Timer::new("Focus").unwrap();
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Paused);
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Running);
    }
}

//! Ordered timer collection and the operations a front end drives

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Phase, Timer, TimerError, TimerStatus};

/// Stable handle for a timer in a `TimerList`. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only copy of one timer for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub name: String,
    pub remaining: Duration,
    pub total: Duration,
    pub status: TimerStatus,
    pub phase: Phase,
}

impl TimerSnapshot {
    fn capture(id: TimerId, timer: &Timer) -> Self {
        Self {
            id,
            name: timer.name().to_string(),
            remaining: timer.remaining(),
            total: timer.total(),
            status: timer.status(),
            phase: timer.phase(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == TimerStatus::Finished
    }

    /// Whole seconds left, rounded up so a running timer never shows zero
    pub fn remaining_seconds(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// `MM:SS`, or `Done` once finished
    pub fn display(&self) -> String {
        if self.is_finished() {
            return "Done".to_string();
        }
        let secs = self.remaining_seconds();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Elapsed share of the total duration in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.total.is_zero() {
            return 1.0;
        }
        let done = self.total.saturating_sub(self.remaining);
        (done.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Number of unfinished and finished timers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimerCounts {
    pub active: usize,
    pub finished: usize,
}

/// Owner of every timer, kept in insertion order
#[derive(Debug)]
pub struct TimerList {
    entries: Vec<(TimerId, Timer)>,
    next_id: u64,
}

impl TimerList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a standard timer and append it
    pub fn add_timer(&mut self, name: &str) -> Result<TimerId, TimerError> {
        Ok(self.insert(Timer::new(name)?))
    }

    /// Append an already built timer
    pub(crate) fn insert(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        debug!("Adding timer {} ({})", id, timer.name());
        self.entries.push((id, timer));
        id
    }

    /// Advance every timer by `elapsed`, in insertion order.
    ///
    /// Returns the ids of timers that finished during this tick.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<TimerId> {
        let mut finished = Vec::new();
        for (id, timer) in &mut self.entries {
            let was_finished = timer.is_finished();
            timer.tick(elapsed);
            if !was_finished && timer.is_finished() {
                finished.push(*id);
            }
        }
        finished
    }

    pub fn pause(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.timer_mut(id)?.pause();
        Ok(())
    }

    pub fn resume(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.timer_mut(id)?.resume();
        Ok(())
    }

    pub fn toggle(&mut self, id: TimerId) -> Result<(), TimerError> {
        self.timer_mut(id)?.toggle();
        Ok(())
    }

    /// Remove a timer whatever its state. Confirmation is the caller's job.
    pub fn delete(&mut self, id: TimerId) -> Result<TimerSnapshot, TimerError> {
        let index = self.position(id)?;
        let (id, timer) = self.entries.remove(index);
        Ok(TimerSnapshot::capture(id, &timer))
    }

    /// Drop every finished timer, keeping the others in order
    pub fn clear_finished(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, timer)| !timer.is_finished());
        before - self.entries.len()
    }

    pub fn get(&self, id: TimerId) -> Result<TimerSnapshot, TimerError> {
        let index = self.position(id)?;
        let (id, timer) = &self.entries[index];
        Ok(TimerSnapshot::capture(*id, timer))
    }

    pub fn list(&self) -> Vec<TimerSnapshot> {
        self.entries
            .iter()
            .map(|(id, timer)| TimerSnapshot::capture(*id, timer))
            .collect()
    }

    pub fn counts(&self) -> TimerCounts {
        let finished = self.entries.iter().filter(|(_, t)| t.is_finished()).count();
        TimerCounts {
            active: self.entries.len() - finished,
            finished,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: TimerId) -> Result<usize, TimerError> {
        self.entries
            .iter()
            .position(|(entry_id, _)| *entry_id == id)
            .ok_or(TimerError::NotFound(id))
    }

    fn timer_mut(&mut self, id: TimerId) -> Result<&mut Timer, TimerError> {
        let index = self.position(id)?;
        Ok(&mut self.entries[index].1)
    }
}

impl Default for TimerList {
    fn default() -> Self {
        Self::new()
    }
}

//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::timer::{TimerCounts, TimerError, TimerId, TimerList, TimerSnapshot};

/// Failures surfaced by `AppState` operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error("failed to lock timer list: {0}")]
    Lock(String),
}

/// Application state shared by the HTTP handlers and the ticker task.
///
/// The timer list sits behind a single mutex so a tick over every timer
/// is applied as one unit with respect to the handlers.
#[derive(Debug)]
pub struct AppState {
    /// The one timer collection for this process
    timers: Mutex<TimerList>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create a new AppState with an empty timer list
    pub fn new(port: u16, host: String) -> Self {
        Self {
            timers: Mutex::new(TimerList::new()),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn lock_timers(&self) -> Result<MutexGuard<'_, TimerList>, StateError> {
        self.timers
            .lock()
            .map_err(|e| StateError::Lock(e.to_string()))
    }

    /// Run a mutation against the timer list, recording it as the last action
    /// when it succeeds
    fn mutate<T, F>(&self, action: &str, op: F) -> Result<T, StateError>
    where
        F: FnOnce(&mut TimerList) -> Result<T, TimerError>,
    {
        let mut timers = self.lock_timers()?;
        let result = op(&mut *timers)?;
        drop(timers); // Release the lock early

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }

        Ok(result)
    }

    /// Create a timer with the given name
    pub fn add_timer(&self, name: &str) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.mutate("add", |timers| {
            let id = timers.add_timer(name)?;
            timers.get(id)
        })?;
        info!("Added timer {} \"{}\"", snapshot.id, snapshot.name);
        Ok(snapshot)
    }

    pub fn pause(&self, id: TimerId) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.mutate("pause", |timers| {
            timers.pause(id)?;
            timers.get(id)
        })?;
        info!("Paused timer {}", id);
        Ok(snapshot)
    }

    pub fn resume(&self, id: TimerId) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.mutate("resume", |timers| {
            timers.resume(id)?;
            timers.get(id)
        })?;
        info!("Resumed timer {}", id);
        Ok(snapshot)
    }

    pub fn toggle(&self, id: TimerId) -> Result<TimerSnapshot, StateError> {
        let snapshot = self.mutate("toggle", |timers| {
            timers.toggle(id)?;
            timers.get(id)
        })?;
        info!("Toggled timer {} to {:?}", id, snapshot.status);
        Ok(snapshot)
    }

    /// Delete a timer unconditionally
    pub fn delete(&self, id: TimerId) -> Result<TimerSnapshot, StateError> {
        let removed = self.mutate("delete", |timers| timers.delete(id))?;
        info!("Deleted timer {} \"{}\"", removed.id, removed.name);
        Ok(removed)
    }

    /// Remove all finished timers, returning how many went away
    pub fn clear_finished(&self) -> Result<usize, StateError> {
        let cleared = self.mutate("clear-finished", |timers| Ok(timers.clear_finished()))?;
        if cleared > 0 {
            info!("Cleared {} finished timers", cleared);
        }
        Ok(cleared)
    }

    /// Advance every timer by `elapsed` while holding the lock once
    pub fn tick(&self, elapsed: Duration) -> Result<Vec<TimerSnapshot>, StateError> {
        let mut timers = self.lock_timers()?;
        let finished = timers.tick(elapsed);
        let snapshots = finished
            .into_iter()
            .filter_map(|id| timers.get(id).ok())
            .collect();
        Ok(snapshots)
    }

    pub fn get(&self, id: TimerId) -> Result<TimerSnapshot, StateError> {
        Ok(self.lock_timers()?.get(id)?)
    }

    /// Insertion-ordered snapshot of every timer
    pub fn list(&self) -> Result<Vec<TimerSnapshot>, StateError> {
        Ok(self.lock_timers()?.list())
    }

    pub fn counts(&self) -> Result<TimerCounts, StateError> {
        Ok(self.lock_timers()?.counts())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock() {
            Ok(last) => match last.as_ref() {
                Some((action, at)) => (Some(action.clone()), Some(*at)),
                None => (None, None),
            },
            Err(e) => {
                warn!("Failed to lock last action: {}", e);
                (None, None)
            }
        }
    }
}

//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerId, TimerSnapshot, TimerStatus};

/// Display color for each phase
pub fn phase_color(phase: Phase) -> &'static str {
    match phase {
        Phase::Green => "#21A179",
        Phase::Orange => "#F39C12",
        Phase::Red => "#E74C3C",
        Phase::Done => "#7F8C8D",
    }
}

/// One timer as rendered by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub id: TimerId,
    pub name: String,
    pub remaining_seconds: u64,
    pub display: String,
    pub status: TimerStatus,
    pub phase: Phase,
    pub color: String,
    pub progress: f64,
}

impl From<&TimerSnapshot> for TimerView {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            remaining_seconds: snapshot.remaining_seconds(),
            display: snapshot.display(),
            status: snapshot.status,
            phase: snapshot.phase,
            color: phase_color(snapshot.phase).to_string(),
            progress: snapshot.progress(),
        }
    }
}

/// Body of `POST /timers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    pub name: String,
}

/// Display order for `GET /timers`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOrder {
    /// Creation order
    #[default]
    Insertion,
    /// Unfinished first, least remaining first, then by name
    ActiveFirst,
    /// Case-insensitive name
    Name,
}

impl ListOrder {
    /// Sort snapshots in place for display
    pub fn apply(self, timers: &mut [TimerSnapshot]) {
        match self {
            ListOrder::Insertion => {}
            ListOrder::ActiveFirst => timers.sort_by(|a, b| {
                a.is_finished()
                    .cmp(&b.is_finished())
                    .then(a.remaining.cmp(&b.remaining))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
            ListOrder::Name => {
                timers.sort_by_key(|t| t.name.to_lowercase());
            }
        }
    }
}

/// Query string of `GET /timers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub order: ListOrder,
}

/// Query string of `DELETE /timers/:id`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// API response structure for mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timers: Vec<TimerView>,
}

impl ApiResponse {
    /// Create a successful response carrying the current timer list
    pub fn ok(message: String, timers: &[TimerSnapshot]) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            timers: timers.iter().map(TimerView::from).collect(),
        }
    }
}

/// Error body returned alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Status bar summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub active: usize,
    pub finished: usize,
    pub timer_duration_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{Timer, TimerList};
    use std::time::Duration;

    fn sample() -> Vec<TimerSnapshot> {
        let mut list = TimerList::new();
        list.insert(Timer::with_duration("done", Duration::from_secs(1)).unwrap());
        list.add_timer("beta").unwrap();
        let paused = list.add_timer("Alpha").unwrap();
        list.pause(paused).unwrap();
        list.tick(Duration::from_secs(30));
        list.list()
    }

    fn names(timers: &[TimerSnapshot]) -> Vec<&str> {
        timers.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn active_first_puts_finished_last_and_least_remaining_first() {
        let mut timers = sample();
        ListOrder::ActiveFirst.apply(&mut timers);
        assert_eq!(names(&timers), ["beta", "Alpha", "done"]);
    }

    #[test]
    fn name_order_ignores_case() {
        let mut timers = sample();
        ListOrder::Name.apply(&mut timers);
        assert_eq!(names(&timers), ["Alpha", "beta", "done"]);
    }

    #[test]
    fn view_carries_display_fields() {
        let timers = sample();
        let done = TimerView::from(&timers[0]);
        assert_eq!(done.display, "Done");
        assert_eq!(done.color, "#7F8C8D");
        assert_eq!(done.phase, Phase::Done);

        let running = TimerView::from(&timers[1]);
        assert_eq!(running.display, "39:30");
        assert_eq!(running.color, "#21A179");
        assert_eq!(running.remaining_seconds, 2370);
    }
}

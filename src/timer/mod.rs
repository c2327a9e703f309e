//! Timer core module
//! 
//! This module contains the countdown model and the controller that owns
//! the ordered timer collection. Nothing in here performs I/O or keeps time
//! on its own; callers drive it through `tick`.

pub mod error;
pub mod list;
pub mod model;

// Re-export main types
pub use error::TimerError;
pub use list::{TimerCounts, TimerId, TimerList, TimerSnapshot};
pub use model::{Phase, Timer, TimerStatus, TIMER_DURATION};

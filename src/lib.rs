//! Named Timers - several independent, named 40 minute countdowns
//! 
//! The `timer` module holds the countdown model and the controller that owns
//! the timer list. The remaining modules wrap a single controller instance in
//! shared application state, tick it in the background and expose it over a
//! small local HTTP API that a UI can drive.

pub mod config;
pub mod timer;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use timer::{Phase, TimerError, TimerId, TimerList, TimerStatus};
pub use api::create_router;
pub use utils::signals::shutdown_signal;

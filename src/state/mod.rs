//! State management module
//! 
//! This module holds the process-wide application state that owns the timer
//! list and the metadata reported by the status endpoint.

pub mod app_state;

// Re-export main types
pub use app_state::{AppState, StateError};

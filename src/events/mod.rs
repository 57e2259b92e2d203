//! Game events and listeners.
//!
//! ## Key Types
//!
//! - `GameEventListener`: one callback per observable change
//! - `LoggingListener`: the default listener, emits `tracing` records
//! - `EventLog`: records `GameEvent` values for replay and assertions

pub mod listener;
pub mod logging;
pub mod recorder;

pub use listener::GameEventListener;
pub use logging::LoggingListener;
pub use recorder::{EventLog, GameEvent};

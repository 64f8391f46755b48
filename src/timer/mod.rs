pub mod controller;
pub mod state;

pub use controller::{TimerController, TimerSnapshot, DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL};
pub use state::{TimerState, TimerStatus};

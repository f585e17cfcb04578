//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Storage (LocalStorage on web, a JSON file natively)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Action, InputSource, activation_for};
pub use storage::{KeyValueStore, MemoryStore};
pub use time::FrameClock;

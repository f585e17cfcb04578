//! Sky Flap - A single-screen gravity flyer arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flyer physics, obstacles, scoring, session state)
//! - `game`: Frame-driven controller tying the simulation to storage and audio
//! - `renderer`: Draw-list generation and the WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (time, input, storage)
//! - `persistence`: Best score load/save on top of the platform store
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameReport, Game};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical world size (canvas units)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Flyer defaults
    pub const FLYER_X: f32 = 50.0;
    pub const FLYER_WIDTH: f32 = 34.0;
    pub const FLYER_HEIGHT: f32 = 24.0;
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 800.0;
    /// Velocity set by a boost (pixels/s, negative = up)
    pub const LIFT: f32 = -300.0;
    /// How long the boost pose stays up (seconds)
    pub const BOOST_POSE_SECS: f64 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_GAP: f32 = 120.0;
    pub const OBSTACLE_SPEED: f32 = 200.0;
    /// Smallest possible top-of-gap offset
    pub const GAP_TOP_MIN: u32 = 20;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 1.5;

    /// Backdrop flips every this many points
    pub const BACKDROP_INTERVAL: u64 = 10;
}

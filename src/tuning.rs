//! Data-driven game balance
//!
//! Every number the simulation depends on lives here so a session can be
//! replayed or rebalanced from a JSON file without touching code.

use std::fmt;
use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a tuning table was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// JSON could not be parsed
    Parse(String),
    /// World must have positive width and height
    EmptyWorld { width: f32, height: f32 },
    /// Flyer box must have positive size
    EmptyFlyer,
    /// Flyer must start inside the world horizontally
    FlyerOutsideWorld { x: f32 },
    /// Lift must point upward
    LiftNotUpward { lift: f32 },
    /// Gravity must not be negative
    NegativeGravity { gravity: f32 },
    /// Obstacles need positive width and speed
    InvalidObstacle,
    /// `gap_top_min` plus the span does not fit in a `u32`
    GapRangeOverflow { min: u32, span: u32 },
    /// Lowest possible gap would extend past the floor
    GapOutOfWorld { lowest_bottom: f32, height: f32 },
    /// Spawn interval must be positive
    InvalidSpawnInterval { interval: f32 },
    /// Backdrop interval must be at least 1
    ZeroBackdropInterval,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "tuning parse error: {msg}"),
            Self::EmptyWorld { width, height } => {
                write!(f, "world size must be positive (got {width}x{height})")
            }
            Self::EmptyFlyer => write!(f, "flyer size must be positive"),
            Self::FlyerOutsideWorld { x } => write!(f, "flyer x {x} is outside the world"),
            Self::LiftNotUpward { lift } => write!(f, "lift must be negative (got {lift})"),
            Self::NegativeGravity { gravity } => {
                write!(f, "gravity must not be negative (got {gravity})")
            }
            Self::InvalidObstacle => write!(f, "obstacle width, gap and speed must be positive"),
            Self::GapRangeOverflow { min, span } => {
                write!(f, "gap top range {min} + {span} overflows")
            }
            Self::GapOutOfWorld {
                lowest_bottom,
                height,
            } => write!(
                f,
                "lowest gap bottom {lowest_bottom} exceeds world height {height}"
            ),
            Self::InvalidSpawnInterval { interval } => {
                write!(f, "spawn interval must be positive (got {interval})")
            }
            Self::ZeroBackdropInterval => write!(f, "backdrop interval must be at least 1"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Balance table for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Flyer ===
    /// Fixed horizontal center of the flyer
    pub flyer_x: f32,
    pub flyer_width: f32,
    pub flyer_height: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity set by a boost (negative = up)
    pub lift: f32,
    /// Boost pose duration (seconds)
    pub boost_pose_secs: f64,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    /// Leftward speed (pixels/s)
    pub obstacle_speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Smallest top-of-gap offset; the range spans half the world height from here
    pub gap_top_min: u32,

    // === Scoring ===
    pub backdrop_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            flyer_x: FLYER_X,
            flyer_width: FLYER_WIDTH,
            flyer_height: FLYER_HEIGHT,
            gravity: GRAVITY,
            lift: LIFT,
            boost_pose_secs: BOOST_POSE_SECS,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            gap_top_min: GAP_TOP_MIN,

            backdrop_interval: BACKDROP_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning table. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// World size as a vector
    pub fn world(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Width of the random top-of-gap range: the integers below half the
    /// world height. Saturates for heights past `u32::MAX`.
    pub fn gap_top_span(&self) -> u32 {
        (self.world_height / 2.0).ceil() as u32
    }

    /// Half-open range `[min, min + span)` of top-of-gap offsets, or `None`
    /// when it is empty or overflows
    pub fn checked_gap_top_range(&self) -> Option<Range<u32>> {
        let end = self.gap_top_min.checked_add(self.gap_top_span())?;
        (end > self.gap_top_min).then_some(self.gap_top_min..end)
    }

    /// Top-of-gap range for spawning. Never empty: a table that fails
    /// [`Tuning::validate`] collapses to `gap_top_min` alone.
    pub fn gap_top_range(&self) -> Range<u32> {
        self.checked_gap_top_range().unwrap_or_else(|| {
            let min = self.gap_top_min.min(u32::MAX - 1);
            min..min + 1
        })
    }

    /// Check the table for values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(TuningError::EmptyWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        if !(self.flyer_width > 0.0 && self.flyer_height > 0.0) {
            return Err(TuningError::EmptyFlyer);
        }
        if !(0.0..self.world_width).contains(&self.flyer_x) {
            return Err(TuningError::FlyerOutsideWorld { x: self.flyer_x });
        }
        if self.gravity < 0.0 {
            return Err(TuningError::NegativeGravity {
                gravity: self.gravity,
            });
        }
        if self.lift >= 0.0 {
            return Err(TuningError::LiftNotUpward { lift: self.lift });
        }
        if !(self.obstacle_width > 0.0 && self.obstacle_gap > 0.0 && self.obstacle_speed > 0.0)
        {
            return Err(TuningError::InvalidObstacle);
        }
        if self.gap_top_span() == 0 {
            return Err(TuningError::EmptyWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        let range = self
            .checked_gap_top_range()
            .ok_or(TuningError::GapRangeOverflow {
                min: self.gap_top_min,
                span: self.gap_top_span(),
            })?;
        let lowest_top = (range.end - 1) as f32;
        let lowest_bottom = lowest_top + self.obstacle_gap;
        if lowest_bottom > self.world_height {
            return Err(TuningError::GapOutOfWorld {
                lowest_bottom,
                height: self.world_height,
            });
        }
        if !(self.spawn_interval > 0.0) {
            return Err(TuningError::InvalidSpawnInterval {
                interval: self.spawn_interval,
            });
        }
        if self.backdrop_interval == 0 {
            return Err(TuningError::ZeroBackdropInterval);
        }
        Ok(())
    }
}

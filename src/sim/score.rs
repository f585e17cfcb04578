//! Score tracking and the day/night backdrop

use serde::{Deserialize, Serialize};

/// Background variant, alternating as the score climbs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Backdrop {
    #[default]
    Day,
    Night,
}

impl Backdrop {
    pub fn toggled(self) -> Self {
        match self {
            Backdrop::Day => Backdrop::Night,
            Backdrop::Night => Backdrop::Day,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Backdrop::Day => "day",
            Backdrop::Night => "night",
        }
    }
}

/// What a single scored point changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointOutcome {
    pub score: u64,
    /// Score landed on a backdrop interval boundary
    pub backdrop_switch: bool,
    /// Best score was raised to this value
    pub new_best: Option<u64>,
}

/// Current and best score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    current: u64,
    best: u64,
    backdrop_interval: u64,
}

impl Scoreboard {
    /// `best` comes from storage (0 when absent)
    pub fn new(best: u64, backdrop_interval: u64) -> Self {
        Self {
            current: 0,
            best,
            backdrop_interval: backdrop_interval.max(1),
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// New session: current back to zero, best untouched
    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Add one point
    pub fn add_point(&mut self) -> PointOutcome {
        self.current += 1;
        let new_best = if self.current > self.best {
            self.best = self.current;
            Some(self.best)
        } else {
            None
        };
        PointOutcome {
            score: self.current,
            backdrop_switch: self.current % self.backdrop_interval == 0,
            new_best,
        }
    }
}

//! Gapped obstacles and the stream that spawns and retires them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, hits_gapped_barrier};
use crate::tuning::Tuning;

/// A barrier with a vertical opening, scrolling leftward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Top of the gap (bottom of the upper segment)
    pub top: f32,
    /// Bottom of the gap (top of the lower segment)
    pub bottom: f32,
    pub speed: f32,
    /// Already scored; never goes back to false
    counted: bool,
}

impl Obstacle {
    /// New obstacle at the right edge with a random gap
    pub fn spawn<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let top = rng.random_range(tuning.gap_top_range());
        Self::with_gap(tuning.world_width, top as f32, tuning)
    }

    /// Obstacle with explicit position and gap top
    pub fn with_gap(x: f32, top: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            width: tuning.obstacle_width,
            top,
            bottom: top + tuning.obstacle_gap,
            speed: tuning.obstacle_speed,
            counted: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.x -= self.speed * dt;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Fully past the left edge of the screen
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    /// Mark as scored once its trailing edge passes `flyer_x`.
    /// Returns true only on the call that flips the flag.
    pub fn try_count(&mut self, flyer_x: f32) -> bool {
        if !self.counted && self.right() < flyer_x {
            self.counted = true;
            return true;
        }
        false
    }

    /// Flyer box overlaps this obstacle outside the gap
    pub fn collides(&self, flyer: &Aabb) -> bool {
        hits_gapped_barrier(flyer, self.x, self.right(), self.top, self.bottom)
    }
}

/// Ordered collection of live obstacles (oldest first) plus spawn timing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    /// Seconds since the last spawn
    since_spawn: f32,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate time, spawn when the interval is exceeded, then move everything.
    /// Returns true if an obstacle was spawned this step.
    pub fn advance<R: Rng>(&mut self, dt: f32, tuning: &Tuning, rng: &mut R) -> bool {
        self.since_spawn += dt;
        let spawned = self.since_spawn > tuning.spawn_interval;
        if spawned {
            let obstacle = Obstacle::spawn(tuning, rng);
            log::debug!("Spawned obstacle, gap {}..{}", obstacle.top, obstacle.bottom);
            self.obstacles.push(obstacle);
            // Full reset, not a decrement
            self.since_spawn = 0.0;
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(dt);
        }
        spawned
    }

    /// Drop obstacles that left the screen. Run after the frame's checks.
    pub fn retain_on_screen(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        before - self.obstacles.len()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Empty the collection and restart spawn timing
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.since_spawn = 0.0;
    }

    pub fn since_spawn(&self) -> f32 {
        self.since_spawn
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn first(&self) -> Option<&Obstacle> {
        self.obstacles.first()
    }
}

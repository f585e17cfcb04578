//! The player-controlled flyer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Boundary, boundary_breach};
use crate::tuning::Tuning;

/// The flyer: falls under gravity, boosted upward by player input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flyer {
    /// Box center (x never changes)
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, positive = down)
    pub velocity: f32,
    /// Collision box size
    pub size: Vec2,
    pub gravity: f32,
    pub lift: f32,
    /// Presentational boost pose (wings down); no physics effect
    pub boosting: bool,
    /// Host time (seconds) when the pose clears
    pub pose_expires_at: f64,
    pose_duration: f64,
    world_height: f32,
}

impl Flyer {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.flyer_x, tuning.world_height / 2.0),
            velocity: 0.0,
            size: Vec2::new(tuning.flyer_width, tuning.flyer_height),
            gravity: tuning.gravity,
            lift: tuning.lift,
            boosting: false,
            pose_expires_at: 0.0,
            pose_duration: tuning.boost_pose_secs,
            world_height: tuning.world_height,
        }
    }

    /// Integrate one step. Returns the world edge touched, if any.
    pub fn update(&mut self, dt: f32) -> Option<Boundary> {
        self.velocity += self.gravity * dt;
        self.pos.y += self.velocity * dt;
        boundary_breach(&self.bounds(), self.world_height)
    }

    /// Override velocity with the lift constant and raise the boost pose
    pub fn boost(&mut self, now: f64) {
        self.velocity = self.lift;
        self.boosting = true;
        self.pose_expires_at = now + self.pose_duration;
    }

    /// Drop the boost pose once its time is up
    pub fn expire_pose(&mut self, now: f64) {
        if self.boosting && now >= self.pose_expires_at {
            self.boosting = false;
        }
    }

    /// Back to mid-height, at rest
    pub fn reset(&mut self) {
        self.pos.y = self.world_height / 2.0;
        self.velocity = 0.0;
        self.boosting = false;
        self.pose_expires_at = 0.0;
    }

    /// Collision box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

//! Axis-aligned box tests between the flyer and obstacle gaps
//!
//! Screen coordinates: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on the x axis (touching edges do not overlap)
    pub fn overlaps_span(&self, left: f32, right: f32) -> bool {
        self.right() > left && self.left() < right
    }

    /// True if any part of the box sticks out of the vertical window `[top, bottom]`
    pub fn escapes_window(&self, top: f32, bottom: f32) -> bool {
        self.top() < top || self.bottom() > bottom
    }
}

/// Which world edge the flyer hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Ceiling,
    Floor,
}

/// Check the box against the world's vertical bounds (inclusive on both edges)
pub fn boundary_breach(bounds: &Aabb, world_height: f32) -> Option<Boundary> {
    if bounds.bottom() >= world_height {
        Some(Boundary::Floor)
    } else if bounds.top() <= 0.0 {
        Some(Boundary::Ceiling)
    } else {
        None
    }
}

/// Flyer hits a gapped barrier spanning `[left, right]` with an opening `[top, bottom]`
pub fn hits_gapped_barrier(flyer: &Aabb, left: f32, right: f32, top: f32, bottom: f32) -> bool {
    flyer.overlaps_span(left, right) && flyer.escapes_window(top, bottom)
}

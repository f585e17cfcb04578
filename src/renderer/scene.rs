//! Per-frame draw list in world coordinates

use glam::Vec2;

use super::shapes::{self, Vertex};
use crate::sim::{Backdrop, Session};

/// Colors for game elements
pub mod colors {
    pub const SKY_DAY: [f32; 4] = [0.44, 0.77, 0.81, 1.0];
    pub const SKY_NIGHT: [f32; 4] = [0.05, 0.08, 0.2, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.33, 0.72, 0.2, 1.0];
    pub const FLYER: [f32; 4] = [0.98, 0.82, 0.2, 1.0];
    /// Flyer while the boost pose is up
    pub const FLYER_BOOST: [f32; 4] = [1.0, 0.5, 0.15, 1.0];
    pub const SCORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SCORE_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}

/// Score glyph cell size (world units)
const SCORE_CELL: f32 = 6.0;
/// Score top-left corner
const SCORE_ORIGIN: Vec2 = Vec2::new(10.0, 10.0);
const SHADOW_OFFSET: f32 = 2.0;

pub fn background_color(backdrop: Backdrop) -> [f32; 4] {
    match backdrop {
        Backdrop::Day => colors::SKY_DAY,
        Backdrop::Night => colors::SKY_NIGHT,
    }
}

/// Build the draw list. The background is always drawn; the playfield and
/// score only while a session is running.
pub fn build_scene(state: &Session) -> Vec<Vertex> {
    let world = state.tuning.world();
    let mut vertices = shapes::rect(Vec2::ZERO, world, background_color(state.backdrop));

    if !state.is_running() {
        return vertices;
    }

    for obstacle in state.obstacles.iter() {
        let left = obstacle.x;
        let right = obstacle.right();
        vertices.extend(shapes::rect(
            Vec2::new(left, 0.0),
            Vec2::new(right, obstacle.top),
            colors::OBSTACLE,
        ));
        vertices.extend(shapes::rect(
            Vec2::new(left, obstacle.bottom),
            Vec2::new(right, world.y),
            colors::OBSTACLE,
        ));
    }

    let bounds = state.flyer.bounds();
    let flyer_color = if state.flyer.boosting {
        colors::FLYER_BOOST
    } else {
        colors::FLYER
    };
    vertices.extend(shapes::rect(bounds.min, bounds.max, flyer_color));

    let score = state.score();
    vertices.extend(shapes::number(
        SCORE_ORIGIN + Vec2::splat(SHADOW_OFFSET),
        score,
        SCORE_CELL,
        colors::SCORE_SHADOW,
    ));
    vertices.extend(shapes::number(SCORE_ORIGIN, score, SCORE_CELL, colors::SCORE));

    vertices
}

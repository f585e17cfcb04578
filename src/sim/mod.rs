//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`'s `dt`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod flyer;
pub mod obstacle;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Boundary, boundary_breach, hits_gapped_barrier};
pub use flyer::Flyer;
pub use obstacle::{Obstacle, ObstacleStream};
pub use score::{Backdrop, PointOutcome, Scoreboard};
pub use state::{EndCause, GameEvent, Session, SessionPhase, session_seed};
pub use tick::tick;

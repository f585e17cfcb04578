//! Demo mode: a simple controller that plays the game by itself
//!
//! Used by the headless native runner and the browser's idle toggle.

use super::state::Session;

/// How far below the gap center the flyer may sink before boosting.
/// A boost rises ~56 px at default tuning, so this keeps the box inside a 120 px gap.
const SINK_MARGIN: f32 = 24.0;

/// Gap the flyer should aim for: the first obstacle whose trailing edge is
/// still ahead of the flyer's left side
pub fn target_gap_center(state: &Session) -> Option<f32> {
    let flyer_left = state.flyer.bounds().left();
    state
        .obstacles
        .iter()
        .find(|o| o.right() >= flyer_left)
        .map(|o| (o.top + o.bottom) / 2.0)
}

/// Whether to boost this frame
pub fn decide(state: &Session) -> bool {
    if !state.is_running() {
        return false;
    }
    let target = target_gap_center(state).unwrap_or(state.tuning.world_height / 2.0);
    state.flyer.pos.y > target + SINK_MARGIN
}

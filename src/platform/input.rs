//! Input mapping
//!
//! Keyboard, pointer and touch all funnel into the same activation.

/// Raw input as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    /// Keyboard key by `KeyboardEvent.code`
    Key(&'a str),
    /// Pointer click on the play surface
    Pointer,
    /// Touch start on the play surface
    Touch,
}

/// What the game does with an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Boost the flyer
    Activate,
    /// Toggle demo mode
    ToggleAutopilot,
    /// Mute or unmute all audio
    ToggleMute,
}

/// The one key that activates
pub const ACTIVATE_KEY: &str = "Space";
/// Demo mode toggle
pub const AUTOPILOT_KEY: &str = "KeyI";
pub const MUTE_KEY: &str = "KeyM";

/// Map a raw input to a game action
pub fn activation_for(source: InputSource<'_>) -> Option<Action> {
    match source {
        InputSource::Key(ACTIVATE_KEY) => Some(Action::Activate),
        InputSource::Key(AUTOPILOT_KEY) => Some(Action::ToggleAutopilot),
        InputSource::Key(MUTE_KEY) => Some(Action::ToggleMute),
        InputSource::Key(_) => None,
        InputSource::Pointer | InputSource::Touch => Some(Action::Activate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sources_activate() {
        assert_eq!(activation_for(InputSource::Key("Space")), Some(Action::Activate));
        assert_eq!(activation_for(InputSource::Pointer), Some(Action::Activate));
        assert_eq!(activation_for(InputSource::Touch), Some(Action::Activate));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(activation_for(InputSource::Key("Enter")), None);
        assert_eq!(activation_for(InputSource::Key("ArrowUp")), None);
        assert_eq!(activation_for(InputSource::Key("space")), None);
    }

    #[test]
    fn test_autopilot_toggle() {
        assert_eq!(
            activation_for(InputSource::Key("KeyI")),
            Some(Action::ToggleAutopilot)
        );
    }

    #[test]
    fn test_mute_key() {
        assert_eq!(activation_for(InputSource::Key("KeyM")), Some(Action::ToggleMute));
        assert_eq!(activation_for(InputSource::Key("m")), None);
    }
}

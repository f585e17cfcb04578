//! Frame-driven game controller
//!
//! Owns the session and the host services it talks to. The host calls
//! [`Game::frame`] once per animation frame and forwards player input; the
//! controller turns sim events into audio cues and best-score writes.

use crate::audio::{AudioSink, Cue};
use crate::persistence;
use crate::platform::input::Action;
use crate::platform::storage::KeyValueStore;
use crate::platform::time::FrameClock;
use crate::settings::Settings;
use crate::sim::{GameEvent, Session, SessionPhase, autopilot, tick};
use crate::tuning::{Tuning, TuningError};

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Seconds simulated (0 on the first frame after a start)
    pub dt: f32,
    /// Phase after the frame
    pub phase: SessionPhase,
}

/// Game controller
pub struct Game<S: KeyValueStore, A: AudioSink> {
    session: Session,
    clock: FrameClock,
    store: S,
    audio: A,
    settings: Settings,
    autopilot: bool,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    /// Idle game with the best score and settings loaded from `store`.
    /// Rejects a tuning table that fails [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64, store: S, mut audio: A) -> Result<Self, TuningError> {
        tuning.validate()?;
        let best = persistence::load_best(&store);
        let settings = Settings::load(&store);
        audio.set_volumes(
            settings.effective_sfx_volume(),
            settings.effective_music_volume(),
        );
        log::info!("Game ready (seed {seed}, best {best})");

        Ok(Self {
            session: Session::new(tuning, best, seed),
            clock: FrameClock::new(),
            store,
            audio,
            settings,
            autopilot: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot {}", if enabled { "on" } else { "off" });
        }
        self.autopilot = enabled;
    }

    /// Start or restart a session. Also what the start and restart buttons do.
    pub fn start(&mut self) {
        self.session.start();
        self.clock.reset();
        self.dispatch_events();
    }

    /// Player activation (key, click, touch). Ignored unless running.
    pub fn activate(&mut self, now_ms: f64) -> bool {
        let boosted = self.session.boost(now_ms / 1000.0);
        self.dispatch_events();
        boosted
    }

    /// Route a mapped input action
    pub fn handle(&mut self, action: Action, now_ms: f64) {
        match action {
            Action::Activate => {
                self.activate(now_ms);
            }
            Action::ToggleAutopilot => self.set_autopilot(!self.autopilot),
            Action::ToggleMute => self.toggle_mute(),
        }
    }

    /// Replace the settings, persist them and apply the new volumes
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.audio.set_volumes(
            self.settings.effective_sfx_volume(),
            self.settings.effective_music_volume(),
        );
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn toggle_mute(&mut self) {
        let mut settings = self.settings.clone();
        settings.muted = !settings.muted;
        log::info!("Audio {}", if settings.muted { "muted" } else { "unmuted" });
        self.apply_settings(settings);
    }

    /// Advance one animation frame at host timestamp `ts_ms`
    pub fn frame(&mut self, ts_ms: f64) -> FrameReport {
        let dt = self.clock.tick(ts_ms);
        let now = ts_ms / 1000.0;

        if self.autopilot && autopilot::decide(&self.session) {
            self.session.boost(now);
        }
        tick(&mut self.session, dt, now);
        self.dispatch_events();

        FrameReport {
            dt,
            phase: self.session.phase,
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Started { .. } => self.audio.start_music(),
                GameEvent::Boosted => self.audio.play(Cue::Boost),
                GameEvent::Scored { .. } => self.audio.play(Cue::Score),
                GameEvent::BackdropChanged(_) => {}
                GameEvent::NewBest(best) => {
                    if let Err(e) = persistence::save_best(&mut self.store, best) {
                        log::warn!("Failed to save best score {best}: {e}");
                    }
                }
                GameEvent::Ended { .. } => {
                    self.audio.stop_music();
                    self.audio.play(Cue::Hit);
                }
            }
        }
    }
}

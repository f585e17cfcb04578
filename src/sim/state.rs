//! Session state and the Idle/Running/Ended state machine
//!
//! Everything one play-through mutates lives in [`Session`]. The host owns a
//! single session and drives it with [`super::tick`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Boundary;
use super::flyer::Flyer;
use super::obstacle::ObstacleStream;
use super::score::{Backdrop, Scoreboard};
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start prompt shown, nothing simulated
    #[default]
    Idle,
    /// Active gameplay, input accepted
    Running,
    /// Run over, summary shown
    Ended,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Floor,
    Ceiling,
    Obstacle,
}

impl From<Boundary> for EndCause {
    fn from(edge: Boundary) -> Self {
        match edge {
            Boundary::Floor => EndCause::Floor,
            Boundary::Ceiling => EndCause::Ceiling,
        }
    }
}

/// Things the host reacts to (audio, storage, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh session began (1-based count)
    Started { session: u32 },
    Boosted,
    Scored { score: u64 },
    BackdropChanged(Backdrop),
    /// Best score raised; should be persisted
    NewBest(u64),
    Ended {
        score: u64,
        best: u64,
        cause: EndCause,
    },
}

/// Per-session RNG seed derived from the run seed
pub fn session_seed(seed: u64, session: u32) -> u64 {
    seed.wrapping_add((session as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Complete game state for one player
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    pub flyer: Flyer,
    pub obstacles: ObstacleStream,
    pub scoreboard: Scoreboard,
    pub backdrop: Backdrop,
    /// Seconds simulated in the current session
    pub elapsed: f32,
    /// Sessions started so far
    pub sessions_started: u32,
    /// Score at the moment the session ended; what the summary shows
    pub final_score: Option<u64>,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Idle session. `best` is the persisted best score.
    ///
    /// `tuning` should already pass [`Tuning::validate`]; [`crate::Game::new`]
    /// enforces that. An unchecked table still never panics, it just plays
    /// badly (see [`Tuning::gap_top_range`]).
    pub fn new(tuning: Tuning, best: u64, seed: u64) -> Self {
        Self {
            seed,
            phase: SessionPhase::Idle,
            flyer: Flyer::new(&tuning),
            obstacles: ObstacleStream::new(),
            scoreboard: Scoreboard::new(best, tuning.backdrop_interval),
            backdrop: Backdrop::Day,
            elapsed: 0.0,
            sessions_started: 0,
            final_score: None,
            rng: Pcg32::seed_from_u64(session_seed(seed, 0)),
            events: Vec::new(),
            tuning,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.current()
    }

    pub fn best(&self) -> u64 {
        self.scoreboard.best()
    }

    /// Start (or restart) a session from any phase
    pub fn start(&mut self) {
        self.rng = Pcg32::seed_from_u64(session_seed(self.seed, self.sessions_started));
        self.sessions_started += 1;
        self.phase = SessionPhase::Running;
        self.scoreboard.reset();
        self.obstacles.clear();
        self.flyer.reset();
        self.backdrop = Backdrop::Day;
        self.elapsed = 0.0;
        self.final_score = None;

        log::info!(
            "Session {} started (best {})",
            self.sessions_started,
            self.scoreboard.best()
        );
        self.events.push(GameEvent::Started {
            session: self.sessions_started,
        });
    }

    /// End the running session. Returns false (and does nothing) unless running.
    pub fn end(&mut self, cause: EndCause) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Ended;
        self.final_score = Some(self.score());
        log::info!(
            "Session {} ended by {:?}: score {} (best {}) after {:.1}s",
            self.sessions_started,
            cause,
            self.score(),
            self.best(),
            self.elapsed
        );
        self.events.push(GameEvent::Ended {
            score: self.score(),
            best: self.best(),
            cause,
        });
        true
    }

    /// Player activation. Ignored unless running.
    pub fn boost(&mut self, now: f64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.flyer.boost(now);
        self.events.push(GameEvent::Boosted);
        true
    }

    /// One obstacle passed: score, backdrop, best. Still counts in the frame
    /// that ended the session; the summary keeps [`Session::final_score`].
    pub(crate) fn award_point(&mut self) {
        let outcome = self.scoreboard.add_point();
        self.events.push(GameEvent::Scored {
            score: outcome.score,
        });

        if outcome.backdrop_switch {
            self.backdrop = self.backdrop.toggled();
            log::debug!(
                "Backdrop -> {} at score {}",
                self.backdrop.as_str(),
                outcome.score
            );
            self.events.push(GameEvent::BackdropChanged(self.backdrop));
        }

        if let Some(best) = outcome.new_best {
            self.events.push(GameEvent::NewBest(best));
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_idle() {
        let mut session = Session::new(Tuning::default(), 12, 1);
        assert_eq!(session.phase, SessionPhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.best(), 12);
        assert_eq!(session.final_score, None);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_no_idle_to_ended() {
        let mut session = Session::new(Tuning::default(), 0, 1);
        assert!(!session.end(EndCause::Floor));
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_boost_ignored_unless_running() {
        let mut session = Session::new(Tuning::default(), 0, 1);
        assert!(!session.boost(0.0));
        assert_eq!(session.flyer.velocity, 0.0);

        session.start();
        assert!(session.boost(0.0));
        assert_eq!(session.flyer.velocity, session.tuning.lift);

        session.end(EndCause::Obstacle);
        session.flyer.velocity = 42.0;
        assert!(!session.boost(1.0));
        assert_eq!(session.flyer.velocity, 42.0);
    }

    #[test]
    fn test_end_is_idempotent() {
        let mut session = Session::new(Tuning::default(), 0, 1);
        session.start();
        session.drain_events();

        assert!(session.end(EndCause::Floor));
        assert!(!session.end(EndCause::Obstacle));
        assert_eq!(session.phase, SessionPhase::Ended);
        assert_eq!(session.final_score, Some(0));

        let events = session.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::Ended {
                score: 0,
                best: 0,
                cause: EndCause::Floor
            }]
        );
    }

    #[test]
    fn test_start_emits_started() {
        let mut session = Session::new(Tuning::default(), 0, 1);
        session.start();
        assert_eq!(session.phase, SessionPhase::Running);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Started { session: 1 }]
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_award_point_events() {
        let mut session = Session::new(Tuning::default(), 9, 1);
        session.start();
        session.drain_events();
        for _ in 0..10 {
            session.award_point();
        }
        let events = session.drain_events();
        assert_eq!(events.iter().filter(|e| matches!(e, GameEvent::Scored { .. })).count(), 10);
        assert!(events.contains(&GameEvent::BackdropChanged(Backdrop::Night)));
        assert!(events.contains(&GameEvent::NewBest(10)));
        assert!(!events.contains(&GameEvent::NewBest(9)));
        assert_eq!(session.backdrop, Backdrop::Night);
    }

    #[test]
    fn test_session_seeds_differ() {
        assert_eq!(session_seed(5, 0), 5);
        assert_ne!(session_seed(5, 1), session_seed(5, 2));
    }
}

//! Simulation events and the hooks the UI/FX layers implement
//!
//! The tick only records what happened. Reacting to it (score text, goal
//! celebration, sounds) is done by whoever implements `MatchHooks`, so the
//! simulation never depends on its observers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::match_state::{MatchOutcome, MatchPhase};
use super::state::{Score, Team};

/// How the ball was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KickKind {
    Shot,
    Pass,
    /// Opponent AI shot at goal
    AiShot,
}

/// Something observable that happened during a tick or a match command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GoalScored { team: Team, score: Score },
    MatchEnded { score: Score, outcome: MatchOutcome },
    Kick { kind: KickKind, position: Vec3 },
    WallHit { position: Vec3 },
    ClockTick { seconds_remaining: u32 },
    PhaseChanged { from: MatchPhase, to: MatchPhase },
}

/// Notification hooks. Every method defaults to doing nothing.
pub trait MatchHooks {
    fn goal_scored(&mut self, _team: Team, _score: Score) {}
    fn match_ended(&mut self, _score: Score, _outcome: MatchOutcome) {}
    fn kick(&mut self, _kind: KickKind, _position: Vec3) {}
    fn wall_hit(&mut self, _position: Vec3) {}
    fn clock_changed(&mut self, _seconds_remaining: u32) {}
    fn phase_changed(&mut self, _from: MatchPhase, _to: MatchPhase) {}
}

/// Hooks that ignore everything
#[derive(Debug, Default)]
pub struct NoHooks;

impl MatchHooks for NoHooks {}

/// Fan events out to the hooks, in order
pub fn dispatch(events: &[GameEvent], hooks: &mut dyn MatchHooks) {
    for event in events {
        match *event {
            GameEvent::GoalScored { team, score } => hooks.goal_scored(team, score),
            GameEvent::MatchEnded { score, outcome } => hooks.match_ended(score, outcome),
            GameEvent::Kick { kind, position } => hooks.kick(kind, position),
            GameEvent::WallHit { position } => hooks.wall_hit(position),
            GameEvent::ClockTick { seconds_remaining } => hooks.clock_changed(seconds_remaining),
            GameEvent::PhaseChanged { from, to } => hooks.phase_changed(from, to),
        }
    }
}

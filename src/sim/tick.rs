//! Per-frame simulation tick
//!
//! Advances one match by one rendered frame. Stage order is fixed: players
//! move, then contacts and walls are resolved, then the ball integrates, then
//! goals and the clock are checked, and the camera follows last.

use glam::Vec3;

use super::agents::{ai_shot, move_avatar, roll_shot, steer_opponents};
use super::collision::{contain_ball, resolve_agent, resolve_wall};
use super::events::{GameEvent, KickKind};
use super::match_state::{ClockUpdate, MatchPhase, detect_goal};
use super::physics::integrate;
use super::state::GameState;
use crate::consts::*;
use crate::finite_or;

/// Player input for a single tick
///
/// `shoot` and `pass` are one-shot: the tick clears them after reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Ground-plane direction, each axis in [-1, 1] (y unused)
    pub direction: Vec3,
    pub shoot: bool,
    pub pass: bool,
}

impl InputSnapshot {
    pub fn new(x: f32, z: f32, shoot: bool, pass: bool) -> Self {
        let mut input = Self {
            direction: Vec3::ZERO,
            shoot,
            pass,
        };
        input.set_direction(x, z);
        input
    }

    /// Set the direction; axes are clamped and non-finite values read as idle
    pub fn set_direction(&mut self, x: f32, z: f32) {
        self.direction = Vec3::new(clean_axis(x), 0.0, clean_axis(z));
    }

    /// Outside the deadzone on either axis
    pub fn is_moving(&self) -> bool {
        self.direction.x.abs() > INPUT_DEADZONE || self.direction.z.abs() > INPUT_DEADZONE
    }

    pub fn clear_actions(&mut self) {
        self.shoot = false;
        self.pass = false;
    }
}

fn clean_axis(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

/// Advance the match by one frame of `dt` real seconds.
///
/// Does nothing outside the running phase. Physics steps are capped at
/// `MAX_FRAME_DT`; the match clock accrues the full `dt`. One-shot actions in
/// `input` are consumed either way.
pub fn tick(state: &mut GameState, input: &mut InputSnapshot, dt: f32) {
    if !state.match_state.is_running() {
        input.clear_actions();
        return;
    }
    if !dt.is_finite() || dt <= 0.0 {
        log::debug!(target: "game", "Skipping tick with dt {}", dt);
        input.clear_actions();
        return;
    }
    let step = dt.min(MAX_FRAME_DT);

    // Players
    move_avatar(&mut state.avatar, input, step, &state.field);
    state.avatar.position = finite_or(state.avatar.position, state.avatar.kickoff);
    let contact = steer_opponents(&mut state.opponents, &state.ball, step);

    // Contacts
    let touch = resolve_agent(&mut state.ball, &state.avatar, input);
    if let Some(kind) = touch.kick {
        state.events.push(GameEvent::Kick {
            kind,
            position: state.ball.position,
        });
    }

    if let Some(index) = contact {
        let shooter = &state.opponents[index];
        let touch = resolve_agent(&mut state.ball, shooter, &InputSnapshot::default());
        if touch.hit
            && roll_shot(&mut state.rng)
            && ai_shot(&mut state.ball, shooter, &state.field, &mut state.rng)
        {
            state.events.push(GameEvent::Kick {
                kind: KickKind::AiShot,
                position: state.ball.position,
            });
        }
    }

    if resolve_wall(&mut state.ball, &state.field.walls) {
        state.events.push(GameEvent::WallHit {
            position: state.ball.position,
        });
    }

    // Ball
    integrate(&mut state.ball, step);
    if !state.ball.position.is_finite() || !state.ball.velocity.is_finite() {
        log::warn!(
            target: "physics",
            "Ball state went non-finite (pos {:?}, vel {:?}), back to kickoff",
            state.ball.position,
            state.ball.velocity
        );
        state.ball.reset();
    }
    if contain_ball(&mut state.ball, &state.field) {
        state.events.push(GameEvent::WallHit {
            position: state.ball.position,
        });
    }

    // Goals and clock
    if let Some(team) = detect_goal(state.ball.position, &state.field) {
        let score = state.match_state.record_goal(team);
        state.events.push(GameEvent::GoalScored { team, score });
        state.reset_kickoff();
    }

    match state.match_state.advance_clock(dt) {
        ClockUpdate::Unchanged => {}
        ClockUpdate::Ticked { seconds_remaining } => {
            state.events.push(GameEvent::ClockTick { seconds_remaining });
        }
        ClockUpdate::Expired => {
            let score = state.match_state.score;
            state.events.push(GameEvent::ClockTick { seconds_remaining: 0 });
            state.events.push(GameEvent::MatchEnded {
                score,
                outcome: state.match_state.outcome(),
            });
            state.events.push(GameEvent::PhaseChanged {
                from: MatchPhase::Running,
                to: MatchPhase::Ended,
            });
        }
    }

    // Camera
    state.camera.follow(state.avatar.position, state.ball.position, step);

    input.clear_actions();
    state.time_ticks += 1;
}

//! Player movement: the human avatar and the opponent AI
//!
//! Allies stand on their kickoff spots. Of the opponents, only the one nearest
//! the ball acts each tick.

use glam::Vec3;
use rand::Rng;

use super::state::{Agent, BallState, Field, Team};
use super::tick::InputSnapshot;
use crate::consts::*;
use crate::{frame_factor, planar};

/// Move the avatar along the input direction and keep it on the pitch
pub fn move_avatar(avatar: &mut Agent, input: &InputSnapshot, dt: f32, field: &Field) {
    if !input.is_moving() {
        return;
    }

    let step = AVATAR_SPEED * frame_factor(dt);
    avatar.position.x += input.direction.x * step;
    avatar.position.z += input.direction.z * step;
    avatar.position = field.clamp_to_bounds(avatar.position);
    avatar.face(input.direction);

    log::trace!(target: "controls", "Avatar moved to {:?}", avatar.position);
}

/// Index and planar distance of the agent closest to `target`.
///
/// Ties keep the earlier agent.
pub fn nearest_to(agents: &[Agent], target: Vec3) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, agent) in agents.iter().enumerate() {
        let d = planar(target - agent.position).length();
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

/// Run the opponent AI for one tick.
///
/// The nearest opponent walks toward the ball when out of reach. Returns its
/// index when it is within contact range instead, so the caller can resolve
/// the touch.
pub fn steer_opponents(opponents: &mut [Agent], ball: &BallState, dt: f32) -> Option<usize> {
    let (index, distance) = nearest_to(opponents, ball.position)?;

    if distance <= AI_CONTACT_RANGE {
        return Some(index);
    }

    let agent = &mut opponents[index];
    let direction = planar(ball.position - agent.position) / distance;
    let step = AI_SPEED * frame_factor(dt);
    agent.position.x += direction.x * step;
    agent.position.z += direction.z * step;
    agent.face(direction);

    log::trace!(target: "ai", "Opponent {} chasing ball, {:.2} away", agent.id, distance);
    None
}

/// Per-contact roll deciding whether the AI shoots this tick
pub fn roll_shot<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random::<f32>() < AI_SHOT_PROBABILITY
}

/// Strike the ball from `shooter` toward the goal the home side defends.
///
/// Replaces the ball's ground velocity with a fixed-speed shot plus a random
/// sideways error. Returns false (ball untouched) if the shooter stands on
/// the aim point.
pub fn ai_shot<R: Rng + ?Sized>(ball: &mut BallState, shooter: &Agent, field: &Field, rng: &mut R) -> bool {
    let target = field.goal_defended_by(Team::Home);
    let Some(direction) = planar(target - shooter.position).try_normalize() else {
        log::debug!(target: "ai", "Opponent {} is on the goal spot, no shot", shooter.id);
        return false;
    };

    ball.velocity.x = direction.x * AI_SHOT_SPEED;
    ball.velocity.z = direction.z * AI_SHOT_SPEED;
    ball.velocity.x += (rng.random::<f32>() - 0.5) * AI_SHOT_SPREAD;

    log::debug!(target: "ai", "Opponent {} shoots, ball velocity {:?}", shooter.id, ball.velocity);
    true
}

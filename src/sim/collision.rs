//! Collision detection and response for the ball
//!
//! Two independent checks: ball vs. axis-aligned walls and ball vs. a player.
//! Both are discrete (no sweep), so the wall check runs before integration.

use glam::Vec3;

use super::events::KickKind;
use super::state::{Agent, AgentRole, BallState, Field, Wall};
use super::tick::InputSnapshot;
use crate::consts::*;
use crate::planar;

/// Axis a wall contact is resolved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// Result of a ball-agent check
#[derive(Debug, Clone)]
pub struct AgentCollision {
    /// Whether a collision occurred
    pub hit: bool,
    /// Ground-plane direction from the agent to the ball (if hit)
    pub normal: Vec3,
    /// Overlap that was pushed out
    pub penetration: f32,
    /// Extra impulse applied on top of the contact
    pub kick: Option<KickKind>,
}

impl AgentCollision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
            kick: None,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Sphere vs. box overlap (closest point within the radius)
pub fn sphere_intersects_wall(center: Vec3, radius: f32, wall: &Wall) -> bool {
    let closest = wall.closest_point(center);
    closest.distance_squared(center) <= radius * radius
}

/// Pick the face that was hit by comparing center offsets normalized by the
/// wall's half extents. Exact ties resolve to X.
pub fn dominant_axis(center: Vec3, wall: &Wall) -> Axis {
    let rx = (center.x - wall.center.x).abs() / wall.half_extents.x.max(f32::EPSILON);
    let rz = (center.z - wall.center.z).abs() / wall.half_extents.z.max(f32::EPSILON);
    if rx >= rz { Axis::X } else { Axis::Z }
}

/// Bounce the ball off every wall it overlaps.
///
/// On a hit the velocity component on the dominant axis is reflected with
/// restitution, the ball is placed flush against that face, and the whole
/// velocity is damped by friction. Returns whether any wall was hit.
pub fn resolve_wall(ball: &mut BallState, walls: &[Wall]) -> bool {
    let mut collided = false;

    for wall in walls {
        if !sphere_intersects_wall(ball.position, ball.radius, wall) {
            continue;
        }
        log::debug!(target: "collisions", "Ball hit wall at {:?}", wall.center);

        match dominant_axis(ball.position, wall) {
            Axis::X => {
                ball.velocity.x = -ball.velocity.x * RESTITUTION;
                let side = side_of(ball.position.x, wall.center.x);
                ball.position.x = wall.center.x + side * (wall.half_extents.x + ball.radius);
            }
            Axis::Z => {
                ball.velocity.z = -ball.velocity.z * RESTITUTION;
                let side = side_of(ball.position.z, wall.center.z);
                ball.position.z = wall.center.z + side * (wall.half_extents.z + ball.radius);
            }
        }

        ball.velocity *= BALL_FRICTION;
        collided = true;
    }

    collided
}

/// Put back a ball that went clean through a wall during a long step.
///
/// A center more than one radius past the pitch edge can no longer overlap
/// the wall it crossed, so `resolve_wall` would never see it again. The ball
/// is placed flush inside and bounced as if it had hit. The goal mouths stay
/// open. Returns whether the ball had escaped.
pub fn contain_ball(ball: &mut BallState, field: &Field) -> bool {
    let mut escaped = false;

    if ball.position.x.abs() > field.half_width + ball.radius {
        let side = ball.position.x.signum();
        ball.position.x = side * (field.half_width - ball.radius);
        ball.velocity.x = -side * ball.velocity.x.abs() * RESTITUTION;
        escaped = true;
    }

    let in_mouth = ball.position.x.abs() < field.goal_half_width;
    if !in_mouth && ball.position.z.abs() > field.half_length + ball.radius {
        let side = ball.position.z.signum();
        ball.position.z = side * (field.half_length - ball.radius);
        ball.velocity.z = -side * ball.velocity.z.abs() * RESTITUTION;
        escaped = true;
    }

    if escaped {
        ball.velocity *= BALL_FRICTION;
        log::debug!(target: "collisions", "Ball left the pitch, brought back to {:?}", ball.position);
    }
    escaped
}

/// Which side of a wall's center a coordinate sits on (center counts as positive)
fn side_of(coord: f32, center: f32) -> f32 {
    if coord >= center { 1.0 } else { -1.0 }
}

/// Resolve contact between the ball and one player.
///
/// A human player who is steering shoves the ball along the input direction;
/// an idle player deflects it. Shoot (or, failing that, pass) adds an impulse
/// along the input direction. The ball is then pushed clear of the player.
/// AI players pass an idle snapshot.
pub fn resolve_agent(ball: &mut BallState, agent: &Agent, input: &InputSnapshot) -> AgentCollision {
    let offset = planar(ball.position - agent.position);
    let distance = offset.length();
    let reach = ball.radius + agent.radius;

    if distance >= reach {
        return AgentCollision::miss();
    }
    if distance <= f32::EPSILON {
        // Centers coincide: no usable normal this tick
        log::debug!(target: "collisions", "Ball and agent {} share a center, skipping", agent.id);
        return AgentCollision::miss();
    }

    let normal = offset / distance;
    let steering = agent.role == AgentRole::HumanControlled && input.is_moving();

    if steering {
        // Carried along the player's run, not the contact normal
        ball.velocity.x += input.direction.x * AGENT_PUSH_SPEED;
        ball.velocity.z += input.direction.z * AGENT_PUSH_SPEED;
    } else {
        ball.velocity = reflect_velocity(ball.velocity, normal) * RESTITUTION * BALL_FRICTION;
    }

    let kick = if input.shoot {
        Some((KickKind::Shot, SHOOT_MULTIPLIER))
    } else if input.pass {
        Some((KickKind::Pass, PASS_MULTIPLIER))
    } else {
        None
    };
    if let Some((kind, multiplier)) = kick {
        ball.velocity.x += input.direction.x * multiplier;
        ball.velocity.z += input.direction.z * multiplier;
        log::debug!(target: "physics", "{:?} applied, ball velocity {:?}", kind, ball.velocity);
    }

    let penetration = reach - distance;
    ball.position += normal * (penetration + SEPARATION_EPSILON);
    log::trace!(target: "collisions", "Ball touched agent {}", agent.id);

    AgentCollision {
        hit: true,
        normal,
        penetration,
        kick: kick.map(|(kind, _)| kind),
    }
}

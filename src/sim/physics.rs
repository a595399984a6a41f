//! Ball integration: gravity, ground bounce, friction and speed cap
//!
//! Horizontal motion is scaled by the frame factor so the ball covers the same
//! ground at any frame rate. Gravity and friction are per-tick constants.

use glam::Vec3;

use super::state::BallState;
use crate::consts::*;
use crate::frame_factor;

/// Advance the ball by one frame of `dt` seconds
pub fn integrate(ball: &mut BallState, dt: f32) {
    let f = frame_factor(dt);

    ball.position.x += ball.velocity.x * f;
    ball.position.z += ball.velocity.z * f;

    // Semi-implicit vertical step: a ball resting on the ground settles with
    // zero velocity instead of alternating between falling and resting.
    ball.velocity.y -= GRAVITY;
    ball.position.y += ball.velocity.y * f;
    if ball.position.y < ball.radius {
        ball.position.y = ball.radius;
        ball.velocity.y = ball.velocity.y.abs() * RESTITUTION * BOUNCE_DAMPING;
        if ball.velocity.y < BOUNCE_REST_THRESHOLD {
            ball.velocity.y = 0.0;
        }
    }

    // Roll the mesh with the ball's travel
    ball.spin.x += ball.velocity.z * BALL_SPIN_FACTOR * f;
    ball.spin.z -= ball.velocity.x * BALL_SPIN_FACTOR * f;

    ball.velocity.x *= BALL_FRICTION;
    ball.velocity.z *= BALL_FRICTION;

    clamp_horizontal_speed(&mut ball.velocity, ball.max_speed);

    let speed = ball.horizontal_speed();
    if speed > 0.01 {
        log::trace!(target: "physics", "Ball speed {:.3} vel {:?}", speed, ball.velocity);
    }
}

/// Rescale the ground-plane velocity down to `max_speed`, keeping direction
pub fn clamp_horizontal_speed(velocity: &mut Vec3, max_speed: f32) {
    let speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
    if speed > max_speed && speed > 0.0 {
        let reduction = max_speed / speed;
        velocity.x *= reduction;
        velocity.z *= reduction;
    }
}

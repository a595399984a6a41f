//! Fute Street - 3D arcade street soccer
//!
//! Core modules:
//! - `sim`: Per-frame simulation (ball physics, collisions, AI, match clock, camera)
//! - `scene`: Seam to the external 3D scene graph that renders the match
//! - `game`: Frame driver gluing input, simulation, scene and UI hooks together
//! - `platform`: Input adapters and the browser bridge
//! - `settings`: Persisted player preferences
//! - `audio`: Web Audio sound cues (browser only)

pub mod game;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::Game;
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-tick constants were tuned for
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Field bounds (collision area, world units)
    pub const FIELD_HALF_WIDTH: f32 = 9.0;
    pub const FIELD_HALF_LENGTH: f32 = 14.0;
    /// Half the width of each goal mouth
    pub const GOAL_HALF_WIDTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.3;
    pub const BALL_MAX_SPEED: f32 = 0.5;
    /// Horizontal damping applied every tick
    pub const BALL_FRICTION: f32 = 0.98;
    /// Fraction of velocity kept after a bounce or wall hit
    pub const RESTITUTION: f32 = 0.7;
    /// Downward velocity added every tick
    pub const GRAVITY: f32 = 0.005;
    /// Extra damping on ground bounces (on top of restitution)
    pub const BOUNCE_DAMPING: f32 = 0.8;
    /// Vertical speed below which a bounce is snapped to rest
    pub const BOUNCE_REST_THRESHOLD: f32 = 0.01;
    /// Visual roll per unit of velocity
    pub const BALL_SPIN_FACTOR: f32 = 5.0;

    /// Agent defaults
    pub const AGENT_RADIUS: f32 = 0.4;
    /// Speed a moving agent shoves the ball with
    pub const AGENT_PUSH_SPEED: f32 = 0.15;
    pub const SHOOT_MULTIPLIER: f32 = 0.3;
    pub const PASS_MULTIPLIER: f32 = 0.15;
    /// Extra push-out after an agent contact
    pub const SEPARATION_EPSILON: f32 = 0.01;

    /// Directional input below this (per axis) counts as idle
    pub const INPUT_DEADZONE: f32 = 0.1;
    pub const AVATAR_SPEED: f32 = 0.15;

    /// Opponent AI
    pub const AI_SPEED: f32 = 0.05;
    pub const AI_CONTACT_RANGE: f32 = 1.0;
    /// Chance per contact tick that the AI shoots
    pub const AI_SHOT_PROBABILITY: f32 = 0.03;
    pub const AI_SHOT_SPEED: f32 = 0.2;
    /// Width of the random sideways error on AI shots
    pub const AI_SHOT_SPREAD: f32 = 0.1;

    /// Match length in seconds
    pub const MATCH_DURATION_SECS: u32 = 60;

    /// Camera follow
    pub const CAMERA_AVATAR_WEIGHT: f32 = 0.7;
    pub const CAMERA_SMOOTHING: f32 = 0.05;
}

/// Scale factor that turns per-frame constants into frame-rate independent steps
#[inline]
pub fn frame_factor(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}

/// Project a vector onto the ground plane (drop Y)
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Return `v` if every component is finite, otherwise `fallback`
#[inline]
pub fn finite_or(v: Vec3, fallback: Vec3) -> Vec3 {
    if v.is_finite() { v } else { fallback }
}

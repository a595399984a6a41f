//! Match simulation module
//!
//! All gameplay logic lives here. This module stays platform-free:
//! - Frame-normalized steps from real elapsed time
//! - Seeded RNG only
//! - Stable iteration order (kickoff order)
//! - No rendering, DOM or audio dependencies

pub mod agents;
pub mod camera;
pub mod collision;
pub mod events;
pub mod match_state;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::{CameraPreset, CameraRig};
pub use collision::{AgentCollision, contain_ball, reflect_velocity, resolve_agent, resolve_wall};
pub use events::{GameEvent, KickKind, MatchHooks, NoHooks, dispatch};
pub use match_state::{ClockUpdate, MatchOutcome, MatchPhase, MatchState, detect_goal};
pub use physics::integrate;
pub use state::{Agent, AgentRole, BallState, Field, GameState, Score, Team, Wall};
pub use tick::{InputSnapshot, tick};

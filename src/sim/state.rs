//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`, which is passed by
//! reference into each component instead of being reachable globally.

use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::{CameraPreset, CameraRig};
use super::events::GameEvent;
use super::match_state::{MatchPhase, MatchState};
use crate::consts::*;

/// Side of the pitch. `Home` is the human player's team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

/// Who drives an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    /// Moved by the input snapshot
    HumanControlled,
    /// Home teammate (currently static)
    AllyAi,
    /// Away player steered by the opponent AI
    OpponentAi,
}

impl AgentRole {
    pub fn team(&self) -> Team {
        match self {
            AgentRole::HumanControlled | AgentRole::AllyAi => Team::Home,
            AgentRole::OpponentAi => Team::Away,
        }
    }
}

/// Kickoff spot of the human avatar
pub const AVATAR_KICKOFF: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Kickoff spots of the home teammates
pub const ALLY_KICKOFF: [Vec3; 5] = [
    Vec3::new(-3.0, 0.0, 3.0),
    Vec3::new(3.0, 0.0, 3.0),
    Vec3::new(-5.0, 0.0, 6.0),
    Vec3::new(5.0, 0.0, 6.0),
    Vec3::new(0.0, 0.0, 10.0),
];

/// Kickoff spots of the away team
pub const OPPONENT_KICKOFF: [Vec3; 6] = [
    Vec3::new(0.0, 0.0, -5.0),
    Vec3::new(-3.0, 0.0, -3.0),
    Vec3::new(3.0, 0.0, -3.0),
    Vec3::new(-5.0, 0.0, -6.0),
    Vec3::new(5.0, 0.0, -6.0),
    Vec3::new(0.0, 0.0, -10.0),
];

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated rolling rotation (radians per axis), purely visual
    pub spin: Vec3,
    pub radius: f32,
    pub max_speed: f32,
}

impl Default for BallState {
    fn default() -> Self {
        Self::new()
    }
}

impl BallState {
    /// Ball resting on the center spot
    pub fn new() -> Self {
        Self {
            position: Self::kickoff_position(),
            velocity: Vec3::ZERO,
            spin: Vec3::ZERO,
            radius: BALL_RADIUS,
            max_speed: BALL_MAX_SPEED,
        }
    }

    pub fn kickoff_position() -> Vec3 {
        Vec3::new(0.0, BALL_RADIUS, 0.0)
    }

    /// Put the ball back on the center spot, at rest
    pub fn reset(&mut self) {
        self.position = Self::kickoff_position();
        self.velocity = Vec3::ZERO;
        self.spin = Vec3::ZERO;
    }

    /// Speed on the ground plane
    pub fn horizontal_speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}

/// A player on the pitch (human avatar, teammate or opponent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: u32,
    pub role: AgentRole,
    pub position: Vec3,
    /// Heading around the vertical axis (radians)
    pub facing: f32,
    pub radius: f32,
    /// Where this agent lines up for kickoff
    pub kickoff: Vec3,
}

impl Agent {
    pub fn new(id: u32, role: AgentRole, kickoff: Vec3) -> Self {
        Self {
            id,
            role,
            position: kickoff,
            facing: 0.0,
            radius: AGENT_RADIUS,
            kickoff,
        }
    }

    /// Return to the kickoff spot
    pub fn reset(&mut self) {
        self.position = self.kickoff;
        self.facing = 0.0;
    }

    /// Turn to face a planar direction (x, z)
    pub fn face(&mut self, direction: Vec3) {
        self.facing = direction.z.atan2(direction.x);
    }
}

/// Axis-aligned wall collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Wall {
    /// Build a wall from its center and full size
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min(), self.max())
    }
}

/// Wall height and thickness of the standard pitch
const WALL_HEIGHT: f32 = 2.0;
const WALL_THICKNESS: f32 = 0.5;
/// How far the back walls reach past the side walls
const BACK_WALL_HALF_SPAN: f32 = 10.0;

/// Pitch geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub half_width: f32,
    pub half_length: f32,
    pub goal_half_width: f32,
    pub walls: Vec<Wall>,
}

impl Default for Field {
    fn default() -> Self {
        Self::standard()
    }
}

impl Field {
    /// Standard street pitch: two side walls plus back walls with a gap at each goal
    pub fn standard() -> Self {
        let side_x = FIELD_HALF_WIDTH + WALL_THICKNESS / 2.0;
        let back_z = FIELD_HALF_LENGTH + WALL_THICKNESS / 2.0;
        let wall_y = WALL_HEIGHT / 2.0;
        let side_size = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 2.0 * (FIELD_HALF_LENGTH + 1.0));

        // Back wall pieces run from the goal post out past the side wall
        let piece_len = BACK_WALL_HALF_SPAN - GOAL_HALF_WIDTH;
        let piece_x = GOAL_HALF_WIDTH + piece_len / 2.0;
        let piece_size = Vec3::new(piece_len, WALL_HEIGHT, WALL_THICKNESS);

        let mut walls = vec![
            Wall::new(Vec3::new(-side_x, wall_y, 0.0), side_size),
            Wall::new(Vec3::new(side_x, wall_y, 0.0), side_size),
        ];
        for z in [-back_z, back_z] {
            for x in [-piece_x, piece_x] {
                walls.push(Wall::new(Vec3::new(x, wall_y, z), piece_size));
            }
        }

        Self {
            half_width: FIELD_HALF_WIDTH,
            half_length: FIELD_HALF_LENGTH,
            goal_half_width: GOAL_HALF_WIDTH,
            walls,
        }
    }

    /// Keep a ground position inside the playable area
    pub fn clamp_to_bounds(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(-self.half_width, self.half_width),
            p.y,
            p.z.clamp(-self.half_length, self.half_length),
        )
    }

    /// Center of the goal mouth the given team defends
    pub fn goal_defended_by(&self, team: Team) -> Vec3 {
        match team {
            Team::Home => Vec3::new(0.0, 0.0, self.half_length),
            Team::Away => Vec3::new(0.0, 0.0, -self.half_length),
        }
    }
}

/// Goals per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn increment(&mut self, team: Team) {
        match team {
            Team::Home => self.home += 1,
            Team::Away => self.away += 1,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.home, self.away)
    }
}

/// Complete simulation context, owned by the frame driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducible AI decisions
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: BallState,
    /// The human-controlled player
    pub avatar: Agent,
    /// Home teammates
    pub allies: Vec<Agent>,
    /// Away team
    pub opponents: Vec<Agent>,
    pub field: Field,
    pub match_state: MatchState,
    pub camera: CameraRig,
    /// Events produced since the last `take_events`
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new match context (in the menu phase) with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_camera(seed, CameraPreset::default())
    }

    pub fn with_camera(seed: u64, preset: CameraPreset) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            ball: BallState::new(),
            avatar: Agent::new(0, AgentRole::HumanControlled, AVATAR_KICKOFF),
            allies: Vec::with_capacity(ALLY_KICKOFF.len()),
            opponents: Vec::with_capacity(OPPONENT_KICKOFF.len()),
            field: Field::standard(),
            match_state: MatchState::new(),
            camera: CameraRig::new(preset),
            events: Vec::new(),
            next_id: 1,
        };

        state.avatar.id = state.next_entity_id();
        for spot in ALLY_KICKOFF {
            let id = state.next_entity_id();
            state.allies.push(Agent::new(id, AgentRole::AllyAi, spot));
        }
        for spot in OPPONENT_KICKOFF {
            let id = state.next_entity_id();
            state.opponents.push(Agent::new(id, AgentRole::OpponentAi, spot));
        }

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ball to the center spot, every player to their kickoff spot
    pub fn reset_kickoff(&mut self) {
        log::debug!(target: "game", "Resetting ball and players to kickoff");
        self.ball.reset();
        self.avatar.reset();
        for agent in self.allies.iter_mut().chain(self.opponents.iter_mut()) {
            agent.reset();
        }
    }

    /// Drain the events produced so far
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn phase(&self) -> MatchPhase {
        self.match_state.phase
    }

    /// Menu -> running. After full time this kicks off a fresh match.
    pub fn start_match(&mut self) -> bool {
        let from = self.match_state.phase;
        let fresh = self.match_state.is_finished();
        let changed = self.match_state.start();
        if changed && fresh {
            log::info!(target: "game", "Previous match is over, starting a new one");
            self.reset_kickoff();
        }
        self.note_transition(from, changed);
        if changed && fresh {
            self.events.push(GameEvent::ClockTick {
                seconds_remaining: self.match_state.clock_seconds,
            });
        }
        changed
    }

    pub fn pause(&mut self) -> bool {
        let from = self.match_state.phase;
        let changed = self.match_state.pause();
        self.note_transition(from, changed)
    }

    pub fn resume(&mut self) -> bool {
        let from = self.match_state.phase;
        let changed = self.match_state.resume();
        self.note_transition(from, changed)
    }

    pub fn toggle_pause(&mut self) -> bool {
        let from = self.match_state.phase;
        let changed = self.match_state.toggle_pause();
        self.note_transition(from, changed)
    }

    /// Fresh match from any phase: score 0-0, full clock, kickoff layout
    pub fn reset_match(&mut self) {
        let from = self.match_state.phase;
        self.match_state.reset();
        self.reset_kickoff();
        log::info!(target: "game", "Match restarted");
        self.events.push(GameEvent::PhaseChanged {
            from,
            to: self.match_state.phase,
        });
        self.events.push(GameEvent::ClockTick {
            seconds_remaining: self.match_state.clock_seconds,
        });
    }

    /// Leave the match; ticking stops until the next start/reset
    pub fn exit_to_menu(&mut self) -> bool {
        let from = self.match_state.phase;
        let changed = self.match_state.exit_to_menu();
        self.note_transition(from, changed)
    }

    fn note_transition(&mut self, from: MatchPhase, changed: bool) -> bool {
        let to = self.match_state.phase;
        if changed {
            log::info!(target: "game", "Phase {:?} -> {:?}", from, to);
            self.events.push(GameEvent::PhaseChanged { from, to });
        } else {
            log::debug!(target: "game", "Ignored phase command in {:?}", from);
        }
        changed
    }
}

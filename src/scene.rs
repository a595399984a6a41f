//! Seam to the external scene graph
//!
//! The renderer owns meshes, materials and the camera object. The simulation
//! only writes transforms through `SceneGraph`, and every write can fail
//! without affecting the match.

use std::collections::HashMap;
use std::fmt;

use glam::Vec3;
use thiserror::Error;

use crate::sim::GameState;

/// Named object in the rendered scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    Ball,
    Avatar,
    Ally(usize),
    Opponent(usize),
    Camera,
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRef::Ball => write!(f, "ball"),
            ObjectRef::Avatar => write!(f, "avatar"),
            ObjectRef::Ally(i) => write!(f, "ally[{}]", i),
            ObjectRef::Opponent(i) => write!(f, "opponent[{}]", i),
            ObjectRef::Camera => write!(f, "camera"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene object not found: {0}")]
    Missing(ObjectRef),

    #[error("Scene graph detached")]
    Detached,
}

/// Render provider the frame driver publishes into
pub trait SceneGraph {
    /// Ball, avatar and camera exist (false during async startup)
    fn is_ready(&self) -> bool;

    /// Place an object. `rotation` is Euler XYZ in radians.
    fn set_transform(&mut self, object: ObjectRef, position: Vec3, rotation: Vec3) -> Result<(), SceneError>;

    fn set_camera(&mut self, position: Vec3, look_at: Vec3) -> Result<(), SceneError>;
}

/// Heading around the vertical axis as an Euler rotation
fn yaw(facing: f32) -> Vec3 {
    Vec3::new(0.0, facing, 0.0)
}

/// Write the current match into the scene.
///
/// Failures are logged and skipped; returns how many writes failed. The
/// camera is left alone while the renderer drives it freely.
pub fn publish(state: &GameState, scene: &mut dyn SceneGraph) -> usize {
    let mut writes: Vec<(ObjectRef, Vec3, Vec3)> =
        Vec::with_capacity(2 + state.allies.len() + state.opponents.len());
    writes.push((ObjectRef::Ball, state.ball.position, state.ball.spin));
    writes.push((ObjectRef::Avatar, state.avatar.position, yaw(state.avatar.facing)));
    for (i, ally) in state.allies.iter().enumerate() {
        writes.push((ObjectRef::Ally(i), ally.position, yaw(ally.facing)));
    }
    for (i, opponent) in state.opponents.iter().enumerate() {
        writes.push((ObjectRef::Opponent(i), opponent.position, yaw(opponent.facing)));
    }

    let mut failures = 0;
    for (object, position, rotation) in writes {
        if let Err(e) = scene.set_transform(object, position, rotation) {
            log::debug!(target: "scene", "Skipped {}: {}", object, e);
            failures += 1;
        }
    }

    if !state.camera.free {
        if let Err(e) = scene.set_camera(state.camera.position, state.camera.look_at) {
            log::debug!(target: "scene", "Skipped camera: {}", e);
            failures += 1;
        }
    }

    failures
}

/// In-memory scene for headless runs and tests
#[derive(Debug, Default)]
pub struct HeadlessScene {
    pub transforms: HashMap<ObjectRef, (Vec3, Vec3)>,
    /// (position, look_at)
    pub camera: Option<(Vec3, Vec3)>,
    pub writes: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position_of(&self, object: ObjectRef) -> Option<Vec3> {
        self.transforms.get(&object).map(|(position, _)| *position)
    }
}

impl SceneGraph for HeadlessScene {
    fn is_ready(&self) -> bool {
        true
    }

    fn set_transform(&mut self, object: ObjectRef, position: Vec3, rotation: Vec3) -> Result<(), SceneError> {
        if object == ObjectRef::Camera {
            return Err(SceneError::Missing(object));
        }
        self.transforms.insert(object, (position, rotation));
        self.writes += 1;
        Ok(())
    }

    fn set_camera(&mut self, position: Vec3, look_at: Vec3) -> Result<(), SceneError> {
        self.camera = Some((position, look_at));
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scene with the opponent meshes still loading
    struct PartialScene {
        inner: HeadlessScene,
    }

    impl SceneGraph for PartialScene {
        fn is_ready(&self) -> bool {
            true
        }

        fn set_transform(&mut self, object: ObjectRef, position: Vec3, rotation: Vec3) -> Result<(), SceneError> {
            match object {
                ObjectRef::Opponent(_) => Err(SceneError::Missing(object)),
                _ => self.inner.set_transform(object, position, rotation),
            }
        }

        fn set_camera(&mut self, _position: Vec3, _look_at: Vec3) -> Result<(), SceneError> {
            Err(SceneError::Detached)
        }
    }

    #[test]
    fn test_publish_writes_every_object() {
        let state = GameState::new(1);
        let mut scene = HeadlessScene::new();

        assert_eq!(publish(&state, &mut scene), 0);

        // ball + avatar + 5 allies + 6 opponents + camera
        assert_eq!(scene.writes, 14);
        assert_eq!(scene.position_of(ObjectRef::Ball), Some(state.ball.position));
        assert_eq!(scene.position_of(ObjectRef::Opponent(5)), Some(state.opponents[5].position));
        assert_eq!(scene.camera, Some((state.camera.position, state.camera.look_at)));
    }

    #[test]
    fn test_publish_skips_failures() {
        let state = GameState::new(1);
        let mut scene = PartialScene {
            inner: HeadlessScene::new(),
        };

        assert_eq!(publish(&state, &mut scene), 7);
        assert_eq!(scene.inner.position_of(ObjectRef::Avatar), Some(state.avatar.position));
        assert_eq!(scene.inner.position_of(ObjectRef::Ally(4)), Some(state.allies[4].position));
    }

    #[test]
    fn test_free_camera_not_published() {
        let mut state = GameState::new(1);
        state.camera.free = true;
        let mut scene = HeadlessScene::new();
        publish(&state, &mut scene);
        assert!(scene.camera.is_none());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SceneError::Missing(ObjectRef::Ally(2)).to_string(), "Scene object not found: ally[2]");
        assert_eq!(SceneError::Detached.to_string(), "Scene graph detached");
    }
}

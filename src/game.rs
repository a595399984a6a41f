//! Frame driver
//!
//! Owns one match and runs it from the renderer's animation-frame callback:
//! timestamps in, one tick, transforms out to the scene, events out to the
//! UI hooks.

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_FPS;
use crate::scene::{SceneGraph, publish};
use crate::settings::Settings;
use crate::sim::{CameraPreset, GameState, InputSnapshot, MatchHooks, MatchPhase, dispatch, tick};

/// Read-only view of the match for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub home: u32,
    pub away: u32,
    pub seconds_remaining: u32,
    pub phase: MatchPhase,
    /// "H x A (Ns)"
    pub text: String,
}

pub struct Game {
    state: GameState,
    input: InputSnapshot,
    settings: Settings,
    /// Timestamp of the previous frame (ms)
    last_frame_ms: Option<f64>,
    /// Already warned about the scene not being ready
    waiting_for_scene: bool,
    /// Already warned about failing scene writes
    scene_failing: bool,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut state = GameState::with_camera(seed, settings.camera_preset);
        state.camera.free = settings.free_camera;
        log::info!(target: "game", "New game (seed {}, camera {})", seed, settings.camera_preset.as_str());

        Self {
            state,
            input: InputSnapshot::default(),
            settings,
            last_frame_ms: None,
            waiting_for_scene: false,
            scene_failing: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    /// Held direction from the active input adapter
    pub fn set_direction(&mut self, x: f32, z: f32) {
        self.input.set_direction(x, z);
    }

    /// Latch a shot for the next tick
    pub fn press_shoot(&mut self) {
        self.input.shoot = true;
    }

    /// Latch a pass for the next tick
    pub fn press_pass(&mut self) {
        self.input.pass = true;
    }

    pub fn start(&mut self) -> bool {
        self.last_frame_ms = None;
        self.state.start_match()
    }

    pub fn pause(&mut self) -> bool {
        self.state.pause()
    }

    pub fn resume(&mut self) -> bool {
        // Time spent paused must not reach the next tick
        self.last_frame_ms = None;
        self.state.resume()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.last_frame_ms = None;
        self.state.toggle_pause()
    }

    pub fn reset_match(&mut self) {
        self.last_frame_ms = None;
        self.input = InputSnapshot::default();
        self.state.reset_match();
    }

    pub fn exit_to_menu(&mut self) -> bool {
        self.state.exit_to_menu()
    }

    /// Switch camera preset (snaps immediately) and remember it
    pub fn set_camera_preset(&mut self, preset: CameraPreset) {
        self.state.camera.set_preset(preset);
        self.settings.camera_preset = preset;
        self.settings.save();
    }

    /// Hand the camera to the renderer's orbit controls, or take it back
    pub fn set_free_camera(&mut self, free: bool) {
        self.state.camera.free = free;
        self.settings.free_camera = free;
        self.settings.save();
        log::info!(target: "camera", "Free camera {}", if free { "on" } else { "off" });
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings.save();
    }

    /// Run one animation frame at timestamp `now_ms`.
    ///
    /// Returns false without touching the match while the scene is still
    /// being built.
    pub fn frame(&mut self, now_ms: f64, scene: &mut dyn SceneGraph, hooks: &mut dyn MatchHooks) -> bool {
        if !scene.is_ready() {
            if !self.waiting_for_scene {
                log::warn!(target: "scene", "Scene objects not ready yet, skipping frames");
                self.waiting_for_scene = true;
            }
            return false;
        }
        if self.waiting_for_scene {
            log::info!(target: "scene", "Scene ready");
            self.waiting_for_scene = false;
        }

        let dt = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 1.0 / REFERENCE_FPS,
        };
        self.last_frame_ms = Some(now_ms);

        tick(&mut self.state, &mut self.input, dt);

        let failures = publish(&self.state, scene);
        if failures > 0 && !self.scene_failing {
            log::warn!(target: "scene", "{} scene writes failed this frame", failures);
        }
        self.scene_failing = failures > 0;

        let events = self.state.take_events();
        dispatch(&events, hooks);
        true
    }

    pub fn hud(&self) -> HudSnapshot {
        let m = &self.state.match_state;
        HudSnapshot {
            home: m.score.home,
            away: m.score.away,
            seconds_remaining: m.clock_seconds,
            phase: m.phase,
            text: m.hud_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HeadlessScene, ObjectRef, SceneError};
    use crate::sim::{MatchOutcome, NoHooks, Score, Team};
    use glam::Vec3;

    struct LoadingScene;

    impl SceneGraph for LoadingScene {
        fn is_ready(&self) -> bool {
            false
        }

        fn set_transform(&mut self, object: ObjectRef, _: Vec3, _: Vec3) -> Result<(), SceneError> {
            Err(SceneError::Missing(object))
        }

        fn set_camera(&mut self, _: Vec3, _: Vec3) -> Result<(), SceneError> {
            Err(SceneError::Detached)
        }
    }

    #[derive(Default)]
    struct Hud {
        goals: Vec<(Team, Score)>,
        ended: Vec<MatchOutcome>,
        phases: Vec<MatchPhase>,
    }

    impl MatchHooks for Hud {
        fn goal_scored(&mut self, team: Team, score: Score) {
            self.goals.push((team, score));
        }

        fn match_ended(&mut self, _score: Score, outcome: MatchOutcome) {
            self.ended.push(outcome);
        }

        fn phase_changed(&mut self, _from: MatchPhase, to: MatchPhase) {
            self.phases.push(to);
        }
    }

    fn started() -> Game {
        let mut game = Game::new(42, Settings::default());
        assert!(game.start());
        game
    }

    #[test]
    fn test_frame_waits_for_scene() {
        let mut game = started();
        game.press_shoot();

        assert!(!game.frame(0.0, &mut LoadingScene, &mut NoHooks));
        assert!(!game.frame(16.0, &mut LoadingScene, &mut NoHooks));

        assert_eq!(game.state().time_ticks, 0);
        // Latched action survives until a real tick
        assert!(game.input().shoot);
    }

    #[test]
    fn test_frame_ticks_publishes_and_dispatches() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        let mut hud = Hud::default();

        assert!(game.frame(1000.0, &mut scene, &mut hud));

        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(hud.phases, vec![MatchPhase::Running]);
        assert_eq!(scene.position_of(ObjectRef::Avatar), Some(game.state().avatar.position));
    }

    #[test]
    fn test_frame_dt_from_timestamps() {
        let mut game = started();
        let mut scene = HeadlessScene::new();

        game.frame(0.0, &mut scene, &mut NoHooks);
        assert_eq!(game.state().match_state.clock_seconds, 60);

        // 1.5 s later: one second comes off the clock
        game.frame(1500.0, &mut scene, &mut NoHooks);
        assert_eq!(game.state().match_state.clock_seconds, 59);
    }

    #[test]
    fn test_pause_time_is_not_counted() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        game.frame(0.0, &mut scene, &mut NoHooks);

        game.pause();
        game.frame(5_000.0, &mut scene, &mut NoHooks);
        game.resume();
        game.frame(30_000.0, &mut scene, &mut NoHooks);

        assert_eq!(game.state().match_state.clock_seconds, 60);
    }

    #[test]
    fn test_press_shoot_is_one_shot() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        game.press_shoot();
        game.press_pass();

        game.frame(0.0, &mut scene, &mut NoHooks);

        assert!(!game.input().shoot);
        assert!(!game.input().pass);
    }

    #[test]
    fn test_goal_reaches_hooks() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        let mut hud = Hud::default();
        game.state.ball.position = Vec3::new(0.5, 0.3, 13.9);
        game.state.ball.velocity = Vec3::new(0.0, 0.0, 0.3);

        game.frame(0.0, &mut scene, &mut hud);

        assert_eq!(hud.goals, vec![(Team::Away, Score { home: 0, away: 1 })]);
        assert_eq!(game.hud().text, "0 x 1 (60s)");
    }

    #[test]
    fn test_camera_preset_snaps_and_persists() {
        let mut game = started();
        game.set_camera_preset(CameraPreset::High);

        assert_eq!(game.state().camera.position, CameraPreset::High.offset());
        assert_eq!(game.state().camera.look_at, Vec3::ZERO);
        assert_eq!(game.settings().camera_preset, CameraPreset::High);
    }

    #[test]
    fn test_settings_seed_the_camera() {
        let settings = Settings {
            camera_preset: CameraPreset::Low,
            free_camera: true,
            muted: false,
        };
        let game = Game::new(1, settings);
        assert_eq!(game.state().camera.preset, CameraPreset::Low);
        assert!(game.state().camera.free);
    }

    #[test]
    fn test_full_match_ends_once() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        let mut hud = Hud::default();

        let mut now = 0.0;
        for _ in 0..(70 * 60) {
            game.frame(now, &mut scene, &mut hud);
            now += 1000.0 / 60.0;
        }

        assert_eq!(hud.ended.len(), 1);
        assert_eq!(game.hud().phase, MatchPhase::Ended);
        assert_eq!(game.hud().seconds_remaining, 0);
    }

    #[test]
    fn test_play_again_from_menu_after_full_time() {
        let mut game = started();
        let mut scene = HeadlessScene::new();
        let mut hud = Hud::default();

        let mut now = 0.0;
        while game.state().phase() != MatchPhase::Ended {
            game.frame(now, &mut scene, &mut hud);
            now += 1000.0;
        }
        assert!(game.exit_to_menu());
        assert!(game.start());

        for _ in 0..90 {
            now += 1000.0 / 60.0;
            game.frame(now, &mut scene, &mut hud);
        }

        assert_eq!(hud.ended.len(), 1);
        let hud_now = game.hud();
        assert_eq!(hud_now.phase, MatchPhase::Running);
        assert_eq!(hud_now.seconds_remaining, 59);
        assert_eq!(game.state().match_state.score, Score::default());
    }
}

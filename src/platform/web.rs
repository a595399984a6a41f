//! Browser bridge
//!
//! The JS renderer builds the three.js scene, then drives `WebGame::frame`
//! from `requestAnimationFrame`. Keyboard, focus and visibility listeners are
//! installed on construction.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::Controls;
use crate::audio::AudioManager;
use crate::game::Game;
use crate::scene::{ObjectRef, SceneError, SceneGraph};
use crate::settings::Settings;
use crate::sim::{
    CameraPreset, GameEvent, KickKind, MatchHooks, MatchOutcome, MatchPhase, Score, Team,
};

/// Install panic hook and console logger
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Fute Street starting...");
}

/// `SceneGraph` over a plain JS object:
/// `{ ball, avatar, allies: [...], opponents: [...], camera }`
/// where each entry has three.js-style `position`/`rotation` and the camera
/// has `lookAt(x, y, z)`.
pub struct JsScene {
    root: JsValue,
}

impl JsScene {
    pub fn new(root: JsValue) -> Self {
        Self { root }
    }

    fn lookup(&self, object: ObjectRef) -> Result<JsValue, SceneError> {
        if !self.root.is_object() {
            return Err(SceneError::Detached);
        }
        let get = |target: &JsValue, key: &str| Reflect::get(target, &JsValue::from_str(key)).ok();

        let value = match object {
            ObjectRef::Ball => get(&self.root, "ball"),
            ObjectRef::Avatar => get(&self.root, "avatar"),
            ObjectRef::Camera => get(&self.root, "camera"),
            ObjectRef::Ally(i) => get(&self.root, "allies")
                .and_then(|list| list.dyn_into::<Array>().ok())
                .map(|list| list.get(i as u32)),
            ObjectRef::Opponent(i) => get(&self.root, "opponents")
                .and_then(|list| list.dyn_into::<Array>().ok())
                .map(|list| list.get(i as u32)),
        };

        match value {
            Some(v) if v.is_object() => Ok(v),
            _ => Err(SceneError::Missing(object)),
        }
    }
}

/// Write x/y/z onto a three.js vector-like property
fn write_xyz(target: &JsValue, key: &str, v: Vec3) -> Result<(), SceneError> {
    let vector = Reflect::get(target, &JsValue::from_str(key)).map_err(|_| SceneError::Detached)?;
    if !vector.is_object() {
        return Err(SceneError::Detached);
    }
    for (axis, value) in [("x", v.x), ("y", v.y), ("z", v.z)] {
        Reflect::set(&vector, &JsValue::from_str(axis), &JsValue::from_f64(value as f64))
            .map_err(|_| SceneError::Detached)?;
    }
    Ok(())
}

impl SceneGraph for JsScene {
    fn is_ready(&self) -> bool {
        [ObjectRef::Ball, ObjectRef::Avatar, ObjectRef::Camera]
            .into_iter()
            .all(|object| self.lookup(object).is_ok())
    }

    fn set_transform(&mut self, object: ObjectRef, position: Vec3, rotation: Vec3) -> Result<(), SceneError> {
        let target = self.lookup(object)?;
        write_xyz(&target, "position", position)?;
        write_xyz(&target, "rotation", rotation)
    }

    fn set_camera(&mut self, position: Vec3, look_at: Vec3) -> Result<(), SceneError> {
        let camera = self.lookup(ObjectRef::Camera)?;
        write_xyz(&camera, "position", position)?;
        let look = Reflect::get(&camera, &JsValue::from_str("lookAt"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(SceneError::Missing(ObjectRef::Camera))?;
        look.call3(
            &camera,
            &JsValue::from_f64(look_at.x as f64),
            &JsValue::from_f64(look_at.y as f64),
            &JsValue::from_f64(look_at.z as f64),
        )
        .map_err(|_| SceneError::Detached)?;
        Ok(())
    }
}

/// Hooks for one frame: sounds play immediately, UI messages are queued as
/// JSON and handed to the page's listener once the game is released.
struct WebHooks<'a> {
    audio: &'a mut AudioManager,
    outbox: Vec<String>,
}

impl WebHooks<'_> {
    fn post(&mut self, event: GameEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => self.outbox.push(json),
            Err(e) => log::warn!("Could not encode {:?}: {}", event, e),
        }
    }
}

impl MatchHooks for WebHooks<'_> {
    fn goal_scored(&mut self, team: Team, score: Score) {
        self.audio.goal_scored(team, score);
        self.post(GameEvent::GoalScored { team, score });
    }

    fn match_ended(&mut self, score: Score, outcome: MatchOutcome) {
        self.audio.match_ended(score, outcome);
        log::info!(target: "game", "{}", outcome.summary(score));
        self.post(GameEvent::MatchEnded { score, outcome });
    }

    fn kick(&mut self, kind: KickKind, position: Vec3) {
        self.audio.kick(kind, position);
        self.post(GameEvent::Kick { kind, position });
    }

    fn wall_hit(&mut self, position: Vec3) {
        self.post(GameEvent::WallHit { position });
    }

    fn clock_changed(&mut self, seconds_remaining: u32) {
        self.post(GameEvent::ClockTick { seconds_remaining });
    }

    fn phase_changed(&mut self, from: MatchPhase, to: MatchPhase) {
        self.audio.phase_changed(from, to);
        self.post(GameEvent::PhaseChanged { from, to });
    }
}

struct Shared {
    game: Game,
    controls: Controls,
    scene: JsScene,
    audio: AudioManager,
    listener: Option<Function>,
}

/// Handle the page's JS holds on to
#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a match bound to `scene` and install DOM listeners
    #[wasm_bindgen(constructor)]
    pub fn new(scene: JsValue) -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(settings.muted);
        let game = Game::new(seed, settings);

        let shared = Rc::new(RefCell::new(Shared {
            game,
            controls: Controls::default(),
            scene: JsScene::new(scene),
            audio,
            listener: None,
        }));

        setup_keyboard(shared.clone());
        setup_auto_pause(shared.clone());
        log::info!("Game initialized with seed: {}", seed);

        WebGame { shared }
    }

    /// Swap in a rebuilt scene object
    pub fn set_scene(&self, scene: JsValue) {
        self.shared.borrow_mut().scene = JsScene::new(scene);
    }

    /// Receive every game event as a JSON string
    pub fn on_event(&self, callback: Function) {
        self.shared.borrow_mut().listener = Some(callback);
    }

    /// Run one animation frame (`requestAnimationFrame` timestamp, ms)
    pub fn frame(&self, now_ms: f64) -> bool {
        let (ticked, outbox, listener) = {
            let mut shared = self.shared.borrow_mut();
            let Shared {
                game,
                scene,
                audio,
                listener,
                ..
            } = &mut *shared;
            let mut hooks = WebHooks {
                audio,
                outbox: Vec::new(),
            };
            let ticked = game.frame(now_ms, scene, &mut hooks);
            (ticked, hooks.outbox, listener.clone())
        };

        // The listener may call back into this object
        if let Some(listener) = listener {
            for json in outbox {
                if let Err(e) = listener.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Event listener threw: {:?}", e);
                }
            }
        }
        ticked
    }

    pub fn start(&self) -> bool {
        let mut shared = self.shared.borrow_mut();
        shared.audio.resume();
        shared.game.start()
    }

    pub fn pause(&self) -> bool {
        self.shared.borrow_mut().game.pause()
    }

    pub fn resume(&self) -> bool {
        self.shared.borrow_mut().game.resume()
    }

    pub fn toggle_pause(&self) -> bool {
        self.shared.borrow_mut().game.toggle_pause()
    }

    pub fn reset_match(&self) {
        let mut shared = self.shared.borrow_mut();
        shared.audio.resume();
        shared.game.reset_match();
    }

    pub fn exit_to_menu(&self) -> bool {
        self.shared.borrow_mut().game.exit_to_menu()
    }

    /// Select a camera preset by name; returns its description
    pub fn set_camera_preset(&self, name: &str) -> Option<String> {
        let preset = CameraPreset::from_name(name)?;
        self.shared.borrow_mut().game.set_camera_preset(preset);
        Some(preset.description().to_string())
    }

    pub fn camera_preset(&self) -> String {
        self.shared.borrow().game.settings().camera_preset.as_str().to_string()
    }

    pub fn set_free_camera(&self, free: bool) {
        self.shared.borrow_mut().game.set_free_camera(free);
    }

    pub fn set_muted(&self, muted: bool) {
        let mut shared = self.shared.borrow_mut();
        shared.audio.set_muted(muted);
        shared.game.set_muted(muted);
    }

    /// On-screen shoot button
    pub fn press_shoot(&self) {
        self.shared.borrow_mut().game.press_shoot();
    }

    /// On-screen pass button
    pub fn press_pass(&self) {
        self.shared.borrow_mut().game.press_pass();
    }

    pub fn joystick_start(&self, radius: f32) {
        let mut shared = self.shared.borrow_mut();
        let Shared { game, controls, .. } = &mut *shared;
        controls.joystick.radius = radius;
        controls.joystick.start();
        controls.sync(game);
    }

    /// Thumb offset from the stick center (CSS pixels)
    pub fn joystick_move(&self, dx: f32, dy: f32) {
        let mut shared = self.shared.borrow_mut();
        let Shared { game, controls, .. } = &mut *shared;
        controls.joystick.move_to(dx, dy);
        controls.sync(game);
    }

    pub fn joystick_end(&self) {
        let mut shared = self.shared.borrow_mut();
        let Shared { game, controls, .. } = &mut *shared;
        controls.joystick.release();
        controls.sync(game);
    }

    /// Thumb offset [x, y] in pixels for drawing the stick
    pub fn joystick_thumb(&self) -> Vec<f32> {
        let (x, y) = self.shared.borrow().controls.joystick.thumb_offset();
        vec![x, y]
    }

    /// Score, clock and phase as JSON for the HUD
    pub fn hud_json(&self) -> String {
        let hud = self.shared.borrow().game.hud();
        serde_json::to_string(&hud).unwrap_or_default()
    }
}

fn setup_keyboard(shared: Rc<RefCell<Shared>>) {
    let Some(window) = web_sys::window() else {
        log::warn!(target: "controls", "No window, keyboard disabled");
        return;
    };

    {
        let shared = shared.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Ok(mut s) = shared.try_borrow_mut() else { return };
            let Shared { game, controls, .. } = &mut *s;
            if controls.key_down(&event.key(), game) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Ok(mut s) = shared.try_borrow_mut() else { return };
            let Shared { game, controls, .. } = &mut *s;
            if controls.key_up(&event.key(), game) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_auto_pause(shared: Rc<RefCell<Shared>>) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    fn auto_pause(shared: &Rc<RefCell<Shared>>, reason: &str) {
        let Ok(mut s) = shared.try_borrow_mut() else { return };
        let Shared { game, controls, .. } = &mut *s;
        controls.release_all(game);
        if game.pause() {
            log::info!("Auto-paused ({})", reason);
        }
    }

    // Visibility change (tab switch, minimize)
    {
        let shared = shared.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                auto_pause(&shared, "tab hidden");
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    // Window blur (click outside)
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            auto_pause(&shared, "window blur");
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

//! Platform abstraction layer
//!
//! Handles device input and browser/native differences:
//! - Keyboard and virtual joystick adapters feeding the input snapshot
//! - Browser bridge (wasm only): renderer handle, DOM events, auto-pause

pub mod joystick;
pub mod keyboard;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use joystick::VirtualJoystick;
pub use keyboard::{KeyAction, KeyboardState};

use crate::game::Game;

/// Every input device feeding one player
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub keyboard: KeyboardState,
    pub joystick: VirtualJoystick,
}

impl Controls {
    /// Combined direction (x, z). Held keys override the stick per axis.
    pub fn direction(&self) -> (f32, f32) {
        let (jx, jz) = self.joystick.axes();
        (
            self.keyboard.axis_x().unwrap_or(jx),
            self.keyboard.axis_z().unwrap_or(jz),
        )
    }

    /// Push the current direction into the game's input
    pub fn sync(&self, game: &mut Game) {
        let (x, z) = self.direction();
        game.set_direction(x, z);
    }

    /// Keydown. Returns whether the key is bound (caller prevents default).
    pub fn key_down(&mut self, key: &str, game: &mut Game) -> bool {
        let (bound, action) = self.keyboard.press(key);
        match action {
            Some(KeyAction::Shoot) => game.press_shoot(),
            Some(KeyAction::Pass) => game.press_pass(),
            None => {}
        }
        if bound {
            self.sync(game);
        }
        bound
    }

    pub fn key_up(&mut self, key: &str, game: &mut Game) -> bool {
        let bound = self.keyboard.release(key);
        if bound {
            self.sync(game);
        }
        bound
    }

    /// Forget everything held (window lost focus)
    pub fn release_all(&mut self, game: &mut Game) {
        self.keyboard.clear();
        self.joystick.release();
        self.sync(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec3;

    #[test]
    fn test_keyboard_overrides_joystick_per_axis() {
        let mut controls = Controls::default();
        controls.joystick.start();
        controls.joystick.move_to(30.0, 30.0);
        controls.keyboard.press("ArrowLeft");

        assert_eq!(controls.direction(), (-1.0, 0.5));
    }

    #[test]
    fn test_keys_drive_game_input() {
        let mut game = Game::new(1, Settings::default());
        let mut controls = Controls::default();

        assert!(controls.key_down("ArrowUp", &mut game));
        assert!(controls.key_down(" ", &mut game));
        assert_eq!(game.input().direction, Vec3::new(0.0, 0.0, -1.0));
        assert!(game.input().shoot);

        assert!(controls.key_up("ArrowUp", &mut game));
        assert_eq!(game.input().direction, Vec3::ZERO);
        // Release does not cancel a latched shot
        assert!(controls.key_up(" ", &mut game));
        assert!(game.input().shoot);

        assert!(!controls.key_down("Tab", &mut game));
    }

    #[test]
    fn test_release_all() {
        let mut game = Game::new(1, Settings::default());
        let mut controls = Controls::default();
        controls.key_down("d", &mut game);
        controls.release_all(&mut game);
        assert_eq!(game.input().direction, Vec3::ZERO);
    }
}

//! Keyboard bindings
//!
//! Arrows or WASD steer, space shoots, Shift passes.

/// One-shot action fired by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Shoot,
    Pass,
}

/// Held-key flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    pub pass: bool,
}

impl KeyboardState {
    fn flag(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "ArrowUp" | "w" | "W" => Some(&mut self.up),
            "ArrowDown" | "s" | "S" => Some(&mut self.down),
            "ArrowLeft" | "a" | "A" => Some(&mut self.left),
            "ArrowRight" | "d" | "D" => Some(&mut self.right),
            " " | "Spacebar" => Some(&mut self.shoot),
            "Shift" => Some(&mut self.pass),
            _ => None,
        }
    }

    /// Handle a keydown (`KeyboardEvent.key` value).
    ///
    /// Returns whether the key is bound and the action it fires, if any.
    /// Actions fire once per press; auto-repeat while held fires nothing.
    pub fn press(&mut self, key: &str) -> (bool, Option<KeyAction>) {
        let was = (self.shoot, self.pass);
        let Some(flag) = self.flag(key) else {
            return (false, None);
        };
        *flag = true;

        let action = match (was, self.shoot, self.pass) {
            ((false, _), true, _) => Some(KeyAction::Shoot),
            ((_, false), _, true) => Some(KeyAction::Pass),
            _ => None,
        };
        (true, action)
    }

    /// Handle a keyup. Returns whether the key is bound.
    pub fn release(&mut self, key: &str) -> bool {
        match self.flag(key) {
            Some(flag) => {
                *flag = false;
                true
            }
            None => false,
        }
    }

    /// Left/right override, if either is held (right wins)
    pub fn axis_x(&self) -> Option<f32> {
        if self.right {
            Some(1.0)
        } else if self.left {
            Some(-1.0)
        } else {
            None
        }
    }

    /// Up/down override, if either is held (down wins). Up runs toward -z.
    pub fn axis_z(&self) -> Option<f32> {
        if self.down {
            Some(1.0)
        } else if self.up {
            Some(-1.0)
        } else {
            None
        }
    }

    /// Drop every held key (focus lost)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        let mut kb = KeyboardState::default();
        assert_eq!(kb.press("w"), (true, None));
        assert_eq!(kb.press("ArrowLeft"), (true, None));
        assert_eq!(kb.axis_z(), Some(-1.0));
        assert_eq!(kb.axis_x(), Some(-1.0));

        assert!(kb.release("W"));
        assert_eq!(kb.axis_z(), None);
        assert_eq!(kb.press("Enter"), (false, None));
        assert!(!kb.release("q"));
    }

    #[test]
    fn test_actions_fire_once_per_press() {
        let mut kb = KeyboardState::default();
        assert_eq!(kb.press(" "), (true, Some(KeyAction::Shoot)));
        // Auto-repeat
        assert_eq!(kb.press(" "), (true, None));
        kb.release(" ");
        assert_eq!(kb.press(" "), (true, Some(KeyAction::Shoot)));

        assert_eq!(kb.press("Shift"), (true, Some(KeyAction::Pass)));
        assert_eq!(kb.press("Shift"), (true, None));
    }

    #[test]
    fn test_opposite_keys() {
        let mut kb = KeyboardState::default();
        kb.press("a");
        kb.press("d");
        kb.press("w");
        kb.press("s");
        assert_eq!(kb.axis_x(), Some(1.0));
        assert_eq!(kb.axis_z(), Some(1.0));
        kb.clear();
        assert_eq!(kb, KeyboardState::default());
    }
}

//! On-screen virtual joystick for touch devices

/// Touch stick: the thumb offset from the stick center, clamped to the stick
/// radius and scaled to [-1, 1] per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualJoystick {
    /// Stick radius in CSS pixels
    pub radius: f32,
    pub active: bool,
    x: f32,
    y: f32,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl VirtualJoystick {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            active: false,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Finger down on the stick
    pub fn start(&mut self) {
        self.active = true;
        self.x = 0.0;
        self.y = 0.0;
        log::debug!(target: "controls", "Joystick active");
    }

    /// Finger moved; `dx`/`dy` are screen offsets from the stick center
    pub fn move_to(&mut self, dx: f32, dy: f32) {
        if !self.active || self.radius.is_nan() || self.radius <= 0.0 || !dx.is_finite() || !dy.is_finite() {
            return;
        }

        let distance = (dx * dx + dy * dy).sqrt();
        let (dx, dy) = if distance > self.radius {
            let scale = self.radius / distance;
            (dx * scale, dy * scale)
        } else {
            (dx, dy)
        };

        self.x = dx / self.radius;
        self.y = dy / self.radius;

        if self.x.abs() > 0.1 || self.y.abs() > 0.1 {
            log::trace!(target: "controls", "Joystick: x={:.2}, y={:.2}", self.x, self.y);
        }
    }

    /// Finger lifted: back to center
    pub fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.x = 0.0;
        self.y = 0.0;
        log::debug!(target: "controls", "Joystick released");
    }

    /// Ground-plane axes (x, z). Screen down maps to +z.
    pub fn axes(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Thumb offset in pixels, for drawing the stick
    pub fn thumb_offset(&self) -> (f32, f32) {
        (self.x * self.radius, self.y * self.radius)
    }
}

//! Follow camera and its named presets

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_AVATAR_WEIGHT, CAMERA_SMOOTHING};
use crate::frame_factor;

/// Camera height presets selectable from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraPreset {
    High,
    #[default]
    Medium,
    Low,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 3] = [CameraPreset::High, CameraPreset::Medium, CameraPreset::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraPreset::High => "high",
            CameraPreset::Medium => "medium",
            CameraPreset::Low => "low",
        }
    }

    /// Parse a preset name as sent by the camera menu
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" | "alta" => Some(CameraPreset::High),
            "medium" | "med" | "media" => Some(CameraPreset::Medium),
            "low" | "baixa" => Some(CameraPreset::Low),
            _ => None,
        }
    }

    /// Camera offset from the followed point
    pub fn offset(&self) -> Vec3 {
        match self {
            CameraPreset::High => Vec3::new(0.0, 18.0, 25.0),
            CameraPreset::Medium => Vec3::new(0.0, 10.0, 15.0),
            CameraPreset::Low => Vec3::new(0.0, 6.0, 10.0),
        }
    }

    /// Text shown when the player switches presets
    pub fn description(&self) -> &'static str {
        match self {
            CameraPreset::High => "High view - panoramic view of the pitch",
            CameraPreset::Medium => "Medium view - balance between pitch and action",
            CameraPreset::Low => "Low view - closer to the action",
        }
    }
}

/// Smoothed follow camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    /// Point on the ground the camera looks at
    pub look_at: Vec3,
    pub preset: CameraPreset,
    /// Free/orbit camera driven by the renderer; follow is suspended
    pub free: bool,
}

impl CameraRig {
    pub fn new(preset: CameraPreset) -> Self {
        Self {
            position: preset.offset(),
            look_at: Vec3::ZERO,
            preset,
            free: false,
        }
    }

    /// Switch presets: jump to the preset offset and look at the center spot
    pub fn set_preset(&mut self, preset: CameraPreset) {
        log::info!(target: "camera", "Camera preset: {}", preset.description());
        self.preset = preset;
        self.position = preset.offset();
        self.look_at = Vec3::ZERO;
    }

    /// Point between avatar and ball the camera tracks (ground level)
    pub fn blended_target(avatar: Vec3, ball: Vec3) -> Vec3 {
        let w = CAMERA_AVATAR_WEIGHT;
        Vec3::new(
            avatar.x * w + ball.x * (1.0 - w),
            0.0,
            avatar.z * w + ball.z * (1.0 - w),
        )
    }

    /// Ease toward the blended target plus preset offset.
    ///
    /// X/Z are smoothed, Y is pinned to the preset height.
    pub fn follow(&mut self, avatar: Vec3, ball: Vec3, dt: f32) {
        if self.free {
            return;
        }

        let target = Self::blended_target(avatar, ball);
        let offset = self.preset.offset();
        let step = CAMERA_SMOOTHING * frame_factor(dt);

        self.position.x += (target.x + offset.x - self.position.x) * step;
        self.position.z += (target.z + offset.z - self.position.z) * step;
        self.position.y = offset.y;
        self.look_at = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_preset_lookup() {
        for preset in CameraPreset::ALL {
            assert_eq!(CameraPreset::from_name(preset.as_str()), Some(preset));
            assert!(!preset.description().is_empty());
        }
        assert_eq!(CameraPreset::from_name("MEDIA"), Some(CameraPreset::Medium));
        assert_eq!(CameraPreset::from_name("orbit"), None);
        assert_eq!(CameraPreset::Medium.offset(), Vec3::new(0.0, 10.0, 15.0));
    }

    #[test]
    fn test_follow_moves_toward_target_without_overshoot() {
        let mut cam = CameraRig::new(CameraPreset::Medium);
        cam.position = Vec3::new(0.0, 10.0, 15.0);

        cam.follow(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 1.0 / 60.0);

        // Target x is 3.0 (30% ball weight)
        assert!(cam.position.x > 0.0);
        assert!(cam.position.x < 3.0);
        assert!((cam.position.x - 0.15).abs() < 1e-4);
        assert_eq!(cam.position.y, 10.0);
        assert!((cam.look_at - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_follow_pins_height() {
        let mut cam = CameraRig::new(CameraPreset::Low);
        cam.position.y = 40.0;
        cam.follow(Vec3::ZERO, Vec3::ZERO, 1.0 / 60.0);
        assert_eq!(cam.position.y, 6.0);
    }

    #[test]
    fn test_free_camera_is_left_alone() {
        let mut cam = CameraRig::new(CameraPreset::High);
        cam.free = true;
        let before = cam.position;
        cam.follow(Vec3::new(5.0, 0.0, 5.0), Vec3::ZERO, 1.0 / 60.0);
        assert_eq!(cam.position, before);
    }

    #[test]
    fn test_set_preset_snaps() {
        let mut cam = CameraRig::new(CameraPreset::Medium);
        cam.position = Vec3::new(3.0, 10.0, 20.0);
        cam.set_preset(CameraPreset::High);
        assert_eq!(cam.position, Vec3::new(0.0, 18.0, 25.0));
        assert_eq!(cam.look_at, Vec3::ZERO);
    }

    proptest! {
        #[test]
        fn prop_follow_never_overshoots(
            ax in -9.0f32..9.0, az in -14.0f32..14.0,
            bx in -9.0f32..9.0, bz in -14.0f32..14.0,
            cx in -20.0f32..20.0,
            dt in 0.001f32..0.1,
        ) {
            let mut cam = CameraRig::new(CameraPreset::Medium);
            cam.position.x = cx;
            let goal_x = CameraRig::blended_target(Vec3::new(ax, 0.0, az), Vec3::new(bx, 0.0, bz)).x;
            let before = (goal_x - cam.position.x).abs();

            cam.follow(Vec3::new(ax, 0.0, az), Vec3::new(bx, 0.0, bz), dt);

            let after = (goal_x - cam.position.x).abs();
            prop_assert!(after <= before + 1e-4);
            // Still on the same side of the target
            prop_assert!((goal_x - cx) * (goal_x - cam.position.x) >= -1e-4);
        }
    }
}

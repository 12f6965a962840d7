use glam::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Closest the camera may get to its orbit center.
pub const MIN_DISTANCE: f32 = 0.1;
/// Furthest the camera may get from its orbit center.
pub const MAX_DISTANCE: f32 = 1000.0;

/// Camera pose representing position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Center/focus point that the camera orbits around.
    pub center: Vec3,
    /// Camera position in world space.
    pub position: Vec3,
    /// Yaw angle in radians (rotation around Y axis).
    pub yaw: f32,
    /// Pitch angle in radians (rotation around X axis).
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, center: Vec3) -> Self {
        let forward = (center - position).normalize_or_zero();
        let yaw = forward.x.atan2(-forward.z);
        let pitch = forward.y.asin().clamp(-FRAC_PI_2, FRAC_PI_2);
        Self {
            center,
            position,
            yaw,
            pitch,
        }
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.center).length()
    }

    /// Orbit around the center point, keeping the distance.
    pub fn orbit(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);

        let dir = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * -Vec3::Z;
        let distance = self.distance();
        self.position = self.center - dir.normalize() * distance;
    }

    /// Pan the camera and center together, scaled by distance.
    pub fn pan(&mut self, delta: Vec2, sensitivity: f32) {
        let right = Quat::from_euler(EulerRot::YXZ, self.yaw, 0.0, 0.0) * Vec3::X;
        let distance = self.distance();
        let pan = (-delta.x * sensitivity * distance) * right
            + (delta.y * sensitivity * distance) * Vec3::Y;
        self.center += pan;
        self.position += pan;
    }

    /// Move towards (negative) or away from (positive) the center.
    pub fn zoom(&mut self, amount: f32) {
        let direction = (self.position - self.center).normalize_or_zero();
        let distance = (self.distance() + amount).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.center + direction * distance;
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

//! Damped manual orbit offset.
//!
//! The flythrough rewrites the camera every frame, so manual interaction
//! is modeled as an offset applied afterwards: mouse drags steer a target
//! yaw/pitch, scroll steers a target zoom, and the applied values ease
//! toward the targets a little each frame.

use glam::{Quat, Vec3};

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.1;
const MIN_ZOOM: f32 = 0.2;
const MAX_ZOOM: f32 = 5.0;
// Keep pitch shy of the poles so the look-at up vector stays valid.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

/// Damped orbit input state.
pub struct OrbitInput {
    yaw: f32,
    pitch: f32,
    zoom: f32,
    yaw_target: f32,
    pitch_target: f32,
    zoom_target: f32,
    damping: f32,
    dragging: bool,
}

impl OrbitInput {
    /// Create with the given easing factor per frame (0 = frozen,
    /// 1 = instant).
    #[must_use]
    pub fn new(damping: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            zoom: 1.0,
            yaw_target: 0.0,
            pitch_target: 0.0,
            zoom_target: 1.0,
            damping: damping.clamp(0.0, 1.0),
            dragging: false,
        }
    }

    /// Press or release the orbit (left mouse) button.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Feed a mouse movement delta in pixels. Ignored unless dragging.
    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.dragging {
            return;
        }
        self.yaw_target -= dx * ROTATE_SPEED;
        self.pitch_target = (self.pitch_target - dy * ROTATE_SPEED)
            .clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Feed a scroll delta (positive = zoom in).
    pub fn handle_scroll(&mut self, delta: f32) {
        self.zoom_target = (self.zoom_target * (1.0 - delta * ZOOM_SPEED))
            .clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Ease the applied values toward their targets. Call once per frame.
    pub fn update(&mut self) {
        self.yaw += (self.yaw_target - self.yaw) * self.damping;
        self.pitch += (self.pitch_target - self.pitch) * self.damping;
        self.zoom += (self.zoom_target - self.zoom) * self.damping;
    }

    /// Apply the current offset to an eye position, orbiting it about
    /// `target`.
    pub fn apply(&self, eye: Vec3, target: Vec3) -> Vec3 {
        let offset = eye - target;
        if offset == Vec3::ZERO {
            return eye;
        }
        let yawed = Quat::from_rotation_y(self.yaw) * offset;
        let right = yawed.cross(Vec3::Y).normalize_or_zero();
        let rotated = if right == Vec3::ZERO {
            yawed
        } else {
            Quat::from_axis_angle(right, self.pitch) * yawed
        };
        target + rotated * self.zoom
    }

    /// Whether the offset is (numerically) at rest.
    pub fn is_settled(&self) -> bool {
        (self.yaw - self.yaw_target).abs() < 1e-4
            && (self.pitch - self.pitch_target).abs() < 1e-4
            && (self.zoom - self.zoom_target).abs() < 1e-4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_offset_leaves_the_eye_alone() {
        let orbit = OrbitInput::new(0.03);
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::ZERO;
        assert!(orbit.apply(eye, target).distance(eye) < 1e-6);
    }

    #[test]
    fn drag_eases_in_over_frames() {
        let mut orbit = OrbitInput::new(0.03);
        orbit.set_dragging(true);
        orbit.handle_mouse_move(100.0, 0.0);
        orbit.set_dragging(false);

        let eye = Vec3::new(0.0, 0.0, 2.0);
        let first = {
            orbit.update();
            orbit.apply(eye, Vec3::ZERO)
        };
        // Far from settled after one frame at 3% damping.
        assert!(!orbit.is_settled());

        for _ in 0..500 {
            orbit.update();
        }
        let settled = orbit.apply(eye, Vec3::ZERO);
        assert!(orbit.is_settled());
        // Motion accumulated well past the first frame's step.
        assert!(settled.distance(first) > first.distance(eye));
    }

    #[test]
    fn movement_without_drag_is_ignored() {
        let mut orbit = OrbitInput::new(0.03);
        orbit.handle_mouse_move(50.0, 50.0);
        for _ in 0..10 {
            orbit.update();
        }
        let eye = Vec3::new(0.0, 0.0, 2.0);
        assert!(orbit.apply(eye, Vec3::ZERO).distance(eye) < 1e-6);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut orbit = OrbitInput::new(1.0);
        orbit.set_dragging(true);
        orbit.handle_mouse_move(80.0, -40.0);
        orbit.update();

        let eye = Vec3::new(0.3, 1.0, 4.0);
        let target = Vec3::new(0.0, 0.5, 0.0);
        let moved = orbit.apply(eye, target);
        let before = eye.distance(target);
        let after = moved.distance(target);
        assert!((before - after).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut orbit = OrbitInput::new(1.0);
        for _ in 0..200 {
            orbit.handle_scroll(1.0);
        }
        orbit.update();
        let eye = Vec3::new(0.0, 0.0, 1.0);
        let d = orbit.apply(eye, Vec3::ZERO).length();
        assert!(d >= MIN_ZOOM - 1e-4);
    }
}

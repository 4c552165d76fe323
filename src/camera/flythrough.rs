//! Per-frame camera travel along the tunnel path.

use glam::Vec3;

use crate::camera::core::Camera;
use crate::scene::spline::TunnelPath;

/// Scale from wall-clock milliseconds to internal time units.
const TIME_SCALE: f64 = 0.1;
/// One full lap around the path, in internal time units.
const LOOP_TIME: f64 = 10_000.0;
/// Number of lookahead samples averaged into the gaze target.
const GAZE_SAMPLES: u32 = 5;
/// Span of the lookahead window as a fraction of the path.
const GAZE_SPAN: f32 = 0.1;

/// Drives the camera around the closed path as a function of elapsed time.
pub struct Flythrough {
    path: TunnelPath,
}

impl Flythrough {
    /// Wrap a path for camera travel.
    #[must_use]
    pub fn new(path: TunnelPath) -> Self {
        Self { path }
    }

    /// The path being traveled.
    pub fn path(&self) -> &TunnelPath {
        &self.path
    }

    /// Normalized progress around the loop at elapsed wall-clock
    /// milliseconds `t_ms`. Periodic: one lap every
    /// `LOOP_TIME / TIME_SCALE` milliseconds.
    pub fn progress(t_ms: f64) -> f32 {
        ((t_ms * TIME_SCALE).rem_euclid(LOOP_TIME) / LOOP_TIME) as f32
    }

    /// Gaze target at progress `p`: the arithmetic mean of `GAZE_SAMPLES`
    /// path points spread over the next `GAZE_SPAN` of the loop.
    /// Averaging ahead smooths the look direction through tight bends.
    pub fn gaze_target(&self, p: f32) -> Vec3 {
        let mut sum = Vec3::ZERO;
        for k in 0..GAZE_SAMPLES {
            let offset = k as f32 / GAZE_SAMPLES as f32 * GAZE_SPAN;
            sum += self.path.point_at((p + offset).rem_euclid(1.0));
        }
        sum / GAZE_SAMPLES as f32
    }

    /// Advance the camera to elapsed time `t_ms`: place the eye on the
    /// path, aim at the smoothed gaze target, then ease the eye toward the
    /// path point.
    pub fn update(&self, camera: &mut Camera, t_ms: f64) {
        let p = Self::progress(t_ms);
        let pos = self.path.point_at(p);

        camera.eye = pos;
        camera.target = self.gaze_target(p);
        // TODO: ease from the previous frame's eye instead? As written the
        // eye was just assigned `pos`, so this lerp settles nothing.
        camera.eye = camera.eye.lerp(pos, 0.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wall-clock milliseconds per lap (`LOOP_TIME / TIME_SCALE`).
    const LAP_MS: f64 = 100_000.0;

    #[test]
    fn progress_starts_at_zero_and_stays_normalized() {
        assert_eq!(Flythrough::progress(0.0), 0.0);
        for t in [16.7, 1234.5, 99_999.0, 123_456.7] {
            let p = Flythrough::progress(t);
            assert!((0.0..1.0).contains(&p), "p={p} at t={t}");
        }
    }

    #[test]
    fn progress_is_periodic() {
        for t in [0.0, 42.0, 31_000.0, 77_777.0] {
            let a = Flythrough::progress(t);
            let b = Flythrough::progress(t + LAP_MS);
            assert!((a - b).abs() < 1e-5, "t={t}: {a} vs {b}");
        }
        // Five whole laps land back where they started.
        assert!(
            (Flythrough::progress(0.0) - Flythrough::progress(5.0 * LAP_MS))
                .abs()
                < 1e-5
        );
    }

    #[test]
    fn quarter_lap_is_quarter_progress() {
        let p = Flythrough::progress(LAP_MS / 4.0);
        assert!((p - 0.25).abs() < 1e-6);
    }

    #[test]
    fn gaze_target_is_mean_of_five_samples() {
        let fly = Flythrough::new(TunnelPath::course());
        let p = 0.3;
        let mut sum = Vec3::ZERO;
        for k in 0..5 {
            sum += fly.path().point_at(p + k as f32 / 5.0 * 0.1);
        }
        let expected = sum / 5.0;
        assert!(fly.gaze_target(p).distance(expected) < 1e-4);
    }

    #[test]
    fn gaze_window_wraps_past_the_loop_end() {
        let fly = Flythrough::new(TunnelPath::course());
        // At p near 1.0 the window reaches past the seam; all samples must
        // still be valid path points (finite, within the course bounds).
        let target = fly.gaze_target(0.98);
        assert!(target.is_finite());
        assert!(target.length() < 20.0);
    }

    #[test]
    fn eye_lands_on_the_path_point() {
        let fly = Flythrough::new(TunnelPath::course());
        let mut camera = Camera {
            eye: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
        };

        fly.update(&mut camera, 0.0);
        let start = fly.path().point_at(0.0);
        assert!(camera.eye.distance(start) < 1e-5);
        assert_ne!(camera.target, camera.eye);

        // A whole number of laps returns the eye to the same spot.
        let eye_t0 = camera.eye;
        fly.update(&mut camera, 5.0 * LAP_MS);
        assert!(camera.eye.distance(eye_t0) < 1e-3);
    }
}

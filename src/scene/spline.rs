//! Closed Catmull-Rom tunnel centerline with arc-length lookup.
//!
//! Pure Vec3 math with no GPU dependencies. The curve is built once and
//! queried every frame, so `point_at` goes through a precomputed
//! cumulative-length table instead of re-evaluating the polynomial basis.

use glam::Vec3;

/// Number of fine samples in the arc-length table.
const ARC_DIVISIONS: usize = 512;

/// Control points of the built-in tunnel course. Hand-tuned closed loop,
/// roughly 16-18 units across with a gentle vertical wobble.
pub const COURSE_POINTS: [Vec3; 16] = [
    Vec3::new(8.000, 0.000, 0.000),
    Vec3::new(8.501, 0.800, 3.524),
    Vec3::new(5.232, 1.600, 5.232),
    Vec3::new(2.375, 0.900, 5.729),
    Vec3::new(0.000, -0.400, 8.600),
    Vec3::new(-3.753, -1.400, 9.055),
    Vec3::new(-4.949, -0.600, 4.949),
    Vec3::new(-5.914, 0.500, 2.451),
    Vec3::new(-8.200, 1.300, 0.000),
    Vec3::new(-8.686, 0.400, -3.600),
    Vec3::new(-5.515, -0.900, -5.515),
    Vec3::new(-2.528, -1.700, -6.098),
    Vec3::new(0.000, -0.800, -8.800),
    Vec3::new(3.677, 0.300, -8.870),
    Vec3::new(5.091, 1.100, -5.091),
    Vec3::new(6.283, 0.600, -2.604),
];

/// Evaluate one span of a closed uniform Catmull-Rom curve.
///
/// Span `i` runs from `points[i]` to `points[(i + 1) % n]`; neighbor
/// points wrap around the loop.
fn span_point(points: &[Vec3], i: usize, t: f32) -> Vec3 {
    let n = points.len();
    let p0 = points[(i + n - 1) % n];
    let p1 = points[i];
    let p2 = points[(i + 1) % n];
    let p3 = points[(i + 2) % n];

    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Closed parametric curve used as the tunnel centerline and the camera's
/// travel path.
///
/// `point_at(u)` is arc-length parameterized: equal steps in `u` cover
/// equal distances along the curve, regardless of control-point spacing.
pub struct TunnelPath {
    samples: Vec<Vec3>,
    cumulative: Vec<f32>,
    total_length: f32,
}

impl TunnelPath {
    /// Build a closed path through the given control points.
    ///
    /// Degenerate inputs (fewer than 3 points) collapse to a stationary
    /// path at the first point (or the origin when empty).
    #[must_use]
    pub fn new(control_points: &[Vec3]) -> Self {
        if control_points.len() < 3 {
            let p = control_points.first().copied().unwrap_or(Vec3::ZERO);
            return Self {
                samples: vec![p, p],
                cumulative: vec![0.0, 0.0],
                total_length: 0.0,
            };
        }

        let n = control_points.len();
        let mut samples = Vec::with_capacity(ARC_DIVISIONS + 1);
        for k in 0..=ARC_DIVISIONS {
            let t = k as f32 / ARC_DIVISIONS as f32 * n as f32;
            let i = (t as usize).min(n - 1);
            samples.push(span_point(control_points, i, t - i as f32));
        }

        let mut cumulative = Vec::with_capacity(samples.len());
        cumulative.push(0.0);
        let mut total = 0.0;
        for pair in samples.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self {
            samples,
            cumulative,
            total_length: total,
        }
    }

    /// The built-in tunnel course.
    #[must_use]
    pub fn course() -> Self {
        Self::new(&COURSE_POINTS)
    }

    /// Total arc length of the closed loop.
    pub fn length(&self) -> f32 {
        self.total_length
    }

    /// Point on the path at normalized arc-length progress `u`.
    ///
    /// `u` wraps into `[0, 1)`, so any real value is valid and
    /// `point_at(u) == point_at(u + 1.0)`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        if self.total_length <= 0.0 {
            return self.samples[0];
        }

        let target = u.rem_euclid(1.0) * self.total_length;
        // First sample whose cumulative length exceeds the target; the
        // table starts at 0.0 so idx >= 1.
        let idx = self
            .cumulative
            .partition_point(|&len| len <= target)
            .clamp(1, self.samples.len() - 1);

        let span = self.cumulative[idx] - self.cumulative[idx - 1];
        let frac = if span > 0.0 {
            (target - self.cumulative[idx - 1]) / span
        } else {
            0.0
        };
        self.samples[idx - 1].lerp(self.samples[idx], frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_first_control_point() {
        let path = TunnelPath::course();
        let start = path.point_at(0.0);
        assert!(start.distance(COURSE_POINTS[0]) < 1e-4);
    }

    #[test]
    fn progress_wraps_around_the_loop() {
        let path = TunnelPath::course();
        for u in [0.0, 0.25, 0.613, 0.999] {
            let a = path.point_at(u);
            let b = path.point_at(u + 1.0);
            let c = path.point_at(u - 1.0);
            assert!(a.distance(b) < 1e-3, "wrap +1 failed at u={u}");
            assert!(a.distance(c) < 1e-3, "wrap -1 failed at u={u}");
        }
    }

    #[test]
    fn loop_closes() {
        let path = TunnelPath::course();
        let end = path.point_at(0.9999);
        let start = path.point_at(0.0);
        assert!(end.distance(start) < 0.1);
    }

    #[test]
    fn arc_length_parameterization_is_uniform() {
        let path = TunnelPath::course();
        let steps = 64;
        let expected = path.length() / steps as f32;
        for k in 0..steps {
            let a = path.point_at(k as f32 / steps as f32);
            let b = path.point_at((k + 1) as f32 / steps as f32);
            let d = a.distance(b);
            // Chord length is bounded by (and close to) the arc step.
            assert!(
                d < expected * 1.05,
                "step {k} covered {d}, expected <= {expected}"
            );
            assert!(d > expected * 0.5, "step {k} covered only {d}");
        }
    }

    #[test]
    fn degenerate_input_is_stationary() {
        let path = TunnelPath::new(&[Vec3::ONE]);
        assert_eq!(path.point_at(0.3), Vec3::ONE);
        assert_eq!(path.length(), 0.0);
    }
}

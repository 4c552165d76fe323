//! Tunnel scene assembly: the wireframe tube and its decoration boxes.
//!
//! Everything here is CPU-side geometry; the engine uploads the baked
//! line-list vertices once at startup.

pub mod color;
pub mod spline;
pub mod tube;
pub mod wireframe;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use self::spline::TunnelPath;
use crate::options::TunnelOptions;
use crate::renderer::line::LineVertex;

/// Fraction of the path a box may drift ahead of its nominal slot.
const PROGRESS_JITTER: f32 = 0.1;
/// Offset applied to the lateral jitter draws (`rand() - 0.4`).
const LATERAL_JITTER_BIAS: f32 = 0.4;
/// Wireframe tube color (pure red; the bloom pass does the rest).
const TUBE_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

/// One decoration box: where it sits on the path and how it is oriented
/// and tinted.
#[derive(Debug, Clone, Copy)]
pub struct BoxPlacement {
    /// Normalized path progress the box was sampled at, in `[0, 1)`.
    pub progress: f32,
    /// World position after lateral jitter.
    pub position: Vec3,
    /// XYZ Euler rotation angles, each in `[0, pi)`.
    pub rotation: Vec3,
    /// RGB color derived from `progress` (see [`color::box_color`]).
    pub color: [f32; 3],
}

/// Sample `count` box placements along the path.
///
/// Each box `i` lands at progress `(i/count + rand*0.1) mod 1`, is nudged
/// off the centerline on x and z, and gets an independent random rotation.
/// Color is a pure function of the (pre-jitter) progress.
pub fn place_boxes(
    path: &TunnelPath,
    count: u32,
    rng: &mut impl Rng,
) -> Vec<BoxPlacement> {
    let mut boxes = Vec::with_capacity(count as usize);
    for i in 0..count {
        let p = (i as f32 / count as f32
            + rng.random::<f32>() * PROGRESS_JITTER)
            .rem_euclid(1.0);

        let mut position = path.point_at(p);
        position.x += rng.random::<f32>() - LATERAL_JITTER_BIAS;
        position.z += rng.random::<f32>() - LATERAL_JITTER_BIAS;

        let rotation = Vec3::new(
            rng.random::<f32>() * std::f32::consts::PI,
            rng.random::<f32>() * std::f32::consts::PI,
            rng.random::<f32>() * std::f32::consts::PI,
        );

        boxes.push(BoxPlacement {
            progress: p,
            position,
            rotation,
            color: color::box_color(p),
        });
    }
    boxes
}

/// Baked line-list geometry for the whole scene.
pub struct TunnelScene {
    /// Tube wireframe vertices (one batch).
    pub tube_vertices: Vec<LineVertex>,
    /// All decoration box wireframe vertices, transforms and colors baked
    /// in (one batch, 55 boxes by default).
    pub box_vertices: Vec<LineVertex>,
    /// The placements the box vertices were baked from.
    pub boxes: Vec<BoxPlacement>,
}

impl TunnelScene {
    /// Build the scene geometry: sweep the tube, extract its wireframe,
    /// then place and bake the decoration boxes.
    pub fn build(
        path: &TunnelPath,
        opts: &TunnelOptions,
        rng: &mut impl Rng,
    ) -> Self {
        let mesh = tube::sweep(
            path,
            opts.tubular_segments,
            opts.radius,
            opts.radial_segments,
        );
        let tube_edges = wireframe::extract_edges(
            &mesh.positions,
            &mesh.indices,
            opts.edge_threshold_deg,
        );
        let mut tube_vertices =
            Vec::with_capacity(tube_edges.len() * 2);
        for [a, b] in &tube_edges {
            tube_vertices.push(LineVertex::new(*a, TUBE_COLOR));
            tube_vertices.push(LineVertex::new(*b, TUBE_COLOR));
        }

        let (box_positions, box_indices) = wireframe::box_mesh(opts.box_size);
        let box_edges = wireframe::extract_edges(
            &box_positions,
            &box_indices,
            opts.edge_threshold_deg,
        );

        let boxes = place_boxes(path, opts.box_count, rng);
        let mut box_vertices =
            Vec::with_capacity(boxes.len() * box_edges.len() * 2);
        for placement in &boxes {
            let rot = Quat::from_euler(
                EulerRot::XYZ,
                placement.rotation.x,
                placement.rotation.y,
                placement.rotation.z,
            );
            for [a, b] in &box_edges {
                let a = placement.position + rot * *a;
                let b = placement.position + rot * *b;
                box_vertices.push(LineVertex::new(a, placement.color));
                box_vertices.push(LineVertex::new(b, placement.color));
            }
        }

        log::debug!(
            "scene built: {} tube edges, {} boxes",
            tube_edges.len(),
            boxes.len()
        );

        Self {
            tube_vertices,
            box_vertices,
            boxes,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn places_the_requested_number_of_boxes() {
        let path = TunnelPath::course();
        let mut rng = StdRng::seed_from_u64(7);
        let boxes = place_boxes(&path, 55, &mut rng);
        assert_eq!(boxes.len(), 55);
    }

    #[test]
    fn progress_stays_normalized_and_color_tracks_it() {
        let path = TunnelPath::course();
        let mut rng = StdRng::seed_from_u64(42);
        for b in place_boxes(&path, 55, &mut rng) {
            assert!((0.0..1.0).contains(&b.progress));
            assert_eq!(b.color, color::box_color(b.progress));
        }
    }

    #[test]
    fn rotation_angles_are_half_turns_at_most() {
        let path = TunnelPath::course();
        let mut rng = StdRng::seed_from_u64(3);
        for b in place_boxes(&path, 200, &mut rng) {
            for angle in [b.rotation.x, b.rotation.y, b.rotation.z] {
                assert!((0.0..std::f32::consts::PI).contains(&angle));
            }
        }
    }

    #[test]
    fn jitter_is_bounded_and_lateral_only() {
        let path = TunnelPath::course();
        let mut rng = StdRng::seed_from_u64(11);
        for b in place_boxes(&path, 100, &mut rng) {
            let base = path.point_at(b.progress);
            let dx = b.position.x - base.x;
            let dz = b.position.z - base.z;
            // Each draw is rand() - 0.4, so offsets live in (-0.4, 0.6).
            assert!((-0.4..0.6).contains(&dx));
            assert!((-0.4..0.6).contains(&dz));
            assert_eq!(b.position.y, base.y);
        }
    }

    #[test]
    fn scene_build_bakes_one_tube_and_all_boxes() {
        let path = TunnelPath::course();
        let opts = TunnelOptions::default();
        let mut rng = StdRng::seed_from_u64(1);
        let scene = TunnelScene::build(&path, &opts, &mut rng);

        assert_eq!(scene.boxes.len(), 55);
        // 12 outline edges per box, two vertices per edge.
        assert_eq!(scene.box_vertices.len(), 55 * 12 * 2);
        // Line list: vertex count must be even and non-trivial.
        assert!(scene.tube_vertices.len() % 2 == 0);
        assert!(!scene.tube_vertices.is_empty());
    }
}

//! Wireframe edge extraction from triangle meshes.
//!
//! Keeps an edge when the dihedral angle between its two adjacent faces
//! exceeds a threshold, or when the edge borders only one face. Quad
//! diagonals on near-flat surfaces fall below the threshold and are culled,
//! which is what turns a solid tube or box into the grid/outline look.

use std::collections::HashMap;

use glam::Vec3;

/// Extract wireframe edges from an indexed triangle mesh.
///
/// `threshold_deg` is the minimum face-normal angle, in degrees, for a
/// shared edge to survive. Boundary edges are always kept. Returns endpoint
/// pairs in mesh space.
#[must_use]
pub fn extract_edges(
    positions: &[Vec3],
    indices: &[u32],
    threshold_deg: f32,
) -> Vec<[Vec3; 2]> {
    struct EdgeFaces {
        first_normal: Vec3,
        second_normal: Option<Vec3>,
    }

    let mut edges: HashMap<(u32, u32), EdgeFaces> = HashMap::new();

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let normal = (positions[b as usize] - positions[a as usize])
            .cross(positions[c as usize] - positions[a as usize])
            .normalize_or_zero();

        for &(u, v) in &[(a, b), (b, c), (c, a)] {
            let key = (u.min(v), u.max(v));
            let _ = edges
                .entry(key)
                .and_modify(|e| e.second_normal = Some(normal))
                .or_insert(EdgeFaces {
                    first_normal: normal,
                    second_normal: None,
                });
        }
    }

    let min_cos = threshold_deg.to_radians().cos();
    let mut out = Vec::new();
    for (&(u, v), faces) in &edges {
        let keep = match faces.second_normal {
            // Shared edge: keep when the faces bend past the threshold.
            Some(n2) => faces.first_normal.dot(n2) < min_cos,
            // Boundary edge.
            None => true,
        };
        if keep {
            out.push([positions[u as usize], positions[v as usize]]);
        }
    }
    out
}

/// Axis-aligned cube mesh of the given edge length, centered at the origin.
/// 8 shared vertices, 12 triangles.
#[must_use]
pub fn box_mesh(size: f32) -> (Vec<Vec3>, Vec<u32>) {
    let h = size * 0.5;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    // Counter-clockwise as seen from outside each face.
    let indices = vec![
        0, 2, 1, 0, 3, 2, // -z
        4, 5, 6, 4, 6, 7, // +z
        0, 1, 5, 0, 5, 4, // -y
        3, 7, 6, 3, 6, 2, // +y
        0, 4, 7, 0, 7, 3, // -x
        1, 2, 6, 1, 6, 5, // +x
    ];
    (positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{spline::TunnelPath, tube};

    #[test]
    fn cube_reduces_to_twelve_edges() {
        let (positions, indices) = box_mesh(0.075);
        let edges = extract_edges(&positions, &indices, 0.2);
        assert_eq!(edges.len(), 12);
        // All kept edges are axis-aligned outline edges of length `size`.
        for [a, b] in &edges {
            let d = *a - *b;
            let axes = [d.x, d.y, d.z]
                .iter()
                .filter(|c| c.abs() > 1e-6)
                .count();
            assert_eq!(axes, 1, "diagonal survived: {a:?} -> {b:?}");
            assert!((d.length() - 0.075).abs() < 1e-5);
        }
    }

    #[test]
    fn threshold_above_face_angle_culls_the_outline() {
        let (positions, indices) = box_mesh(1.0);
        // Cube faces meet at 90 degrees; a threshold past that culls
        // every shared edge.
        let edges = extract_edges(&positions, &indices, 91.0);
        assert!(edges.is_empty());
    }

    #[test]
    fn tube_keeps_at_least_the_longitudinal_grid() {
        let path = TunnelPath::course();
        let mesh = tube::sweep(&path, 64, 0.65, 16);
        let edges = extract_edges(&mesh.positions, &mesh.indices, 0.2);
        // Longitudinal edges always bend by the full radial step (22.5 deg
        // at 16 segments); rings and diagonals depend on path curvature.
        let grid = 64 * 16;
        assert!(edges.len() >= grid, "only {} edges kept", edges.len());
        assert!(edges.len() <= 3 * grid);
    }
}

//! Tube mesh generation: sweep a circular cross-section along the path.

use glam::Vec3;

use super::spline::TunnelPath;

/// Triangle mesh produced by the sweep. Rings share vertices with their
/// neighbors (indices wrap in both directions), so edge extraction can key
/// edges on index pairs alone.
pub struct TubeMesh {
    /// Vertex positions, `tubular_segments * radial_segments` entries.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

/// A ring frame along the swept path.
struct Frame {
    center: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

/// Compute rotation-minimizing frames at `count` evenly spaced points
/// around the closed path, using the double reflection method
/// (Wang et al. 2008).
fn compute_frames(path: &TunnelPath, count: u32) -> Vec<Frame> {
    let count = count.max(2) as usize;
    let step = 1.0 / count as f32;

    let centers: Vec<Vec3> =
        (0..count).map(|i| path.point_at(i as f32 * step)).collect();
    let tangents: Vec<Vec3> = (0..count)
        .map(|i| {
            let ahead = path.point_at((i as f32 + 0.5) * step);
            let behind = path.point_at((i as f32 - 0.5) * step);
            (ahead - behind).normalize_or_zero()
        })
        .collect();

    let t0 = tangents[0];
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let mut normal = t0.cross(arbitrary).normalize();

    let mut frames = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 {
            let v1 = centers[i] - centers[i - 1];
            let c1 = v1.dot(v1);
            if c1 > 1e-10 {
                // First reflection
                let r_l = normal - (2.0 / c1) * v1.dot(normal) * v1;
                let t_l = tangents[i - 1] - (2.0 / c1) * v1.dot(tangents[i - 1]) * v1;
                // Second reflection
                let v2 = tangents[i] - t_l;
                let c2 = v2.dot(v2);
                if c2 > 1e-10 {
                    normal = r_l - (2.0 / c2) * v2.dot(r_l) * v2;
                } else {
                    normal = r_l;
                }
            }
            // Re-orthonormalize against the current tangent
            normal = (normal - tangents[i] * tangents[i].dot(normal))
                .normalize_or_zero();
            if normal == Vec3::ZERO {
                normal = tangents[i].cross(Vec3::X).normalize_or_zero();
            }
        }
        let binormal = tangents[i].cross(normal).normalize_or_zero();
        frames.push(Frame {
            center: centers[i],
            normal,
            binormal,
        });
    }
    frames
}

/// Sweep a `radial_segments`-gon of the given radius along the closed path
/// with `tubular_segments` rings.
#[must_use]
pub fn sweep(
    path: &TunnelPath,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
) -> TubeMesh {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let frames = compute_frames(path, tubular);

    let mut positions =
        Vec::with_capacity((tubular as usize) * (radial as usize));
    for frame in &frames {
        for j in 0..radial {
            let theta =
                j as f32 / radial as f32 * std::f32::consts::TAU;
            let offset =
                frame.normal * theta.cos() + frame.binormal * theta.sin();
            positions.push(frame.center + offset * radius);
        }
    }

    // Two triangles per quad; both directions wrap (closed tube).
    let mut indices =
        Vec::with_capacity((tubular as usize) * (radial as usize) * 6);
    for i in 0..tubular {
        let i1 = (i + 1) % tubular;
        for j in 0..radial {
            let j1 = (j + 1) % radial;
            let a = i * radial + j;
            let b = i1 * radial + j;
            let c = i1 * radial + j1;
            let d = i * radial + j1;
            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[a, c, d]);
        }
    }

    TubeMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_produces_closed_grid() {
        let path = TunnelPath::course();
        let mesh = sweep(&path, 32, 0.65, 8);
        assert_eq!(mesh.positions.len(), 32 * 8);
        assert_eq!(mesh.indices.len(), 32 * 8 * 6);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.positions.len());
    }

    #[test]
    fn ring_vertices_sit_on_the_cross_section() {
        let path = TunnelPath::course();
        let radius = 0.65;
        let mesh = sweep(&path, 64, radius, 16);
        // Every vertex of ring 0 is `radius` away from the ring center.
        let center = path.point_at(0.0);
        for v in &mesh.positions[..16] {
            let d = v.distance(center);
            assert!((d - radius).abs() < 1e-3, "vertex at distance {d}");
        }
    }
}

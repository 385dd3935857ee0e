//! Procedural point clouds.
//!
//! Vertex layouts follow the usual parametric-geometry convention: a
//! `(segments + 1)` grid per parametric axis, seam vertices duplicated. The
//! duplicates are harmless for point rendering and give each shape a
//! predictable count.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::model::ModelMesh;

/// UV sphere of `radius`, `(width_segments + 1) * (height_segments + 1)`
/// points.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Vec<Vec3> {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut points = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_v, cos_v) = (v * PI).sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_u, cos_u) = (u * TAU).sin_cos();
            points.push(Vec3::new(
                -radius * cos_u * sin_v,
                radius * cos_v,
                radius * sin_u * sin_v,
            ));
        }
    }
    points
}

/// Torus in the XY plane, `(radial_segments + 1) * (tubular_segments + 1)`
/// points.
pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
) -> Vec<Vec3> {
    let r = radial_segments.max(3);
    let t = tubular_segments.max(3);
    let mut points = Vec::with_capacity(((r + 1) * (t + 1)) as usize);
    for j in 0..=r {
        let (sin_v, cos_v) = (j as f32 / r as f32 * TAU).sin_cos();
        for i in 0..=t {
            let (sin_u, cos_u) = (i as f32 / t as f32 * TAU).sin_cos();
            let ring = radius + tube * cos_v;
            points.push(Vec3::new(ring * cos_u, ring * sin_u, tube * sin_v));
        }
    }
    points
}

/// Surface grid of an axis-aligned cube with edge `size`,
/// `6 * (divisions + 1)^2` points.
pub fn cube(size: f32, divisions: u32) -> Vec<Vec3> {
    let d = divisions.max(1);
    let half = size * 0.5;
    let side = (d + 1) as usize;
    let mut points = Vec::with_capacity(6 * side * side);
    for axis in 0..3 {
        for sign in [-1.0, 1.0] {
            for a in 0..=d {
                for b in 0..=d {
                    let s = -half + size * a as f32 / d as f32;
                    let t = -half + size * b as f32 / d as f32;
                    let face = half * sign;
                    points.push(match axis {
                        0 => Vec3::new(face, s, t),
                        1 => Vec3::new(s, face, t),
                        _ => Vec3::new(s, t, face),
                    });
                }
            }
        }
    }
    points
}

/// Helix around +Y, centered on the origin, `count` points evenly spaced
/// along the curve.
pub fn helix(radius: f32, height: f32, turns: f32, count: u32) -> Vec<Vec3> {
    let n = count.max(2);
    (0..n)
        .map(|i| {
            let t = i as f32 / (n - 1) as f32;
            let (sin_a, cos_a) = (t * turns * TAU).sin_cos();
            Vec3::new(radius * cos_a, height * (t - 0.5), radius * sin_a)
        })
        .collect()
}

/// Flatten points into a named mesh.
pub fn to_mesh(name: &str, points: &[Vec3]) -> ModelMesh {
    ModelMesh {
        name: name.to_owned(),
        positions: points.iter().flat_map(|p| p.to_array()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_matches_grid_count_and_radius() {
        let pts = sphere(3.0, 32, 16);
        assert_eq!(pts.len(), 33 * 17);
        for p in &pts {
            assert!((p.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn torus_points_sit_on_the_tube() {
        let pts = torus(2.5, 0.8, 16, 48);
        assert_eq!(pts.len(), 17 * 49);
        for p in &pts {
            let ring = Vec3::new(p.x, p.y, 0.0).length();
            let to_center = Vec3::new(ring - 2.5, 0.0, p.z).length();
            assert!((to_center - 0.8).abs() < 1e-4);
        }
    }

    #[test]
    fn cube_points_lie_on_faces() {
        let pts = cube(4.0, 12);
        assert_eq!(pts.len(), 6 * 13 * 13);
        for p in &pts {
            assert!((p.abs().max_element() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn helix_spans_its_height() {
        let pts = helix(2.0, 6.0, 5.0, 400);
        assert_eq!(pts.len(), 400);
        assert!((pts[0].y + 3.0).abs() < 1e-5);
        assert!((pts[399].y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_segment_counts_are_raised() {
        assert_eq!(sphere(1.0, 0, 0).len(), 4 * 3);
        assert_eq!(helix(1.0, 1.0, 1.0, 0).len(), 2);
    }

    #[test]
    fn mesh_flattens_in_order() {
        let mesh = to_mesh("pair", &[Vec3::new(1.0, 2.0, 3.0), Vec3::splat(4.0)]);
        assert_eq!(mesh.name, "pair");
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0, 4.0, 4.0, 4.0]);
    }
}

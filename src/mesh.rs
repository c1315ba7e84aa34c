//! Sphere mesh generation
//!
//! A UV-sphere grid of `density x density` vertices, packaged into one quad per
//! grid cell. Both axes wrap, so the quads form a closed torus-like band over
//! the sphere; pole rows are not merged.

use crate::error::{Error, Result};
use crate::rasterizer::{Color, Quaternion, Vec3};

/// Axis used to sweep the generating circle around the sphere
pub const CREATION_AXIS: Vec3 = Vec3::UP;

/// Default spin axis. Slightly shorter than unit length (~0.998); kept as is so
/// frames match the reference rendering.
pub const DEFAULT_ROTATION_AXIS: Vec3 = Vec3::new(0.704, 0.71, 0.0);

/// A quad face: four indices into `Mesh::vertices`
///
/// Corner order is `P(col,row), P(col,row+1), P(col+1,row+1), P(col+1,row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
}

impl Face {
    pub fn new(indices: [usize; 4]) -> Self {
        Self { indices }
    }
}

/// A quad mesh spun about its center
#[derive(Debug, Clone)]
pub struct Mesh {
    pub center: Vec3,
    pub radius: f64,
    pub rotation_axis: Vec3,
    /// Vertices per parametrization axis (0 for meshes not built from a grid)
    pub density: usize,
    pub color: Color,
    /// World-space positions, rotated in place every frame
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn with_rotation_axis(mut self, axis: Vec3) -> Self {
        self.rotation_axis = axis;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Current positions of a face's four corners
    pub fn corners(&self, face: &Face) -> [Vec3; 4] {
        face.indices.map(|i| self.vertices[i])
    }

    /// Vertex index of grid position `(col, row)`
    pub fn grid_index(&self, col: usize, row: usize) -> usize {
        col * self.density + row
    }

    /// Axis-aligned cube with six outward quads, for testing face orientation
    pub fn cube(center: Vec3, half_size: f64) -> Self {
        let h = half_size;
        let vertices = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ]
        .map(|v| v + center)
        .to_vec();

        let faces = [
            [4, 5, 6, 7], // Front (+z)
            [0, 3, 2, 1], // Back (-z)
            [3, 7, 6, 2], // Top (+y)
            [0, 1, 5, 4], // Bottom (-y)
            [1, 2, 6, 5], // Right (+x)
            [0, 4, 7, 3], // Left (-x)
        ]
        .map(Face::new)
        .to_vec();

        Self {
            center,
            radius: half_size * 3f64.sqrt(),
            rotation_axis: DEFAULT_ROTATION_AXIS,
            density: 0,
            color: Color::CYAN,
            vertices,
            faces,
        }
    }
}

/// Build a UV-sphere of `(4 * density_factor)²` quads.
///
/// Vertex `(col, row)` is the point `(r·sin x, r·cos x, 0)` turned about
/// [`CREATION_AXIS`] by the quaternion `(cos z, sin z · axis)`, where
/// `z = 2π·col/density` and `x = 2π·row/density`. The quaternion uses the full
/// column angle, so for even densities columns `c` and `c + density/2` land on
/// the same meridian.
pub fn build_sphere(center: Vec3, radius: f64, density_factor: i32) -> Result<Mesh> {
    if density_factor <= 0 {
        return Err(Error::invalid("density_factor", format!("{} must be positive", density_factor)));
    }
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(Error::invalid("radius", format!("{} must be positive", radius)));
    }
    if !center.is_finite() {
        return Err(Error::invalid("center", "must be finite"));
    }

    let density = 4 * density_factor as usize;
    let step = std::f64::consts::TAU / density as f64;

    let mut vertices = Vec::with_capacity(density * density);
    for col in 0..density {
        let z_angle = step * col as f64;
        let (sin_z, cos_z) = z_angle.sin_cos();
        let q = Quaternion::new(
            cos_z,
            sin_z * CREATION_AXIS.x,
            sin_z * CREATION_AXIS.y,
            sin_z * CREATION_AXIS.z,
        );

        for row in 0..density {
            let x_angle = step * row as f64;
            let p = Vec3::new(radius * x_angle.sin(), radius * x_angle.cos(), 0.0);
            vertices.push(q.sandwich(p) + center);
        }
    }

    let mut faces = Vec::with_capacity(density * density);
    for col in 0..density {
        let next_col = (col + 1) % density;
        for row in 0..density {
            let next_row = (row + 1) % density;
            faces.push(Face::new([
                col * density + row,
                col * density + next_row,
                next_col * density + next_row,
                next_col * density + row,
            ]));
        }
    }

    tracing::debug!(density, vertices = vertices.len(), faces = faces.len(), "built sphere mesh");

    Ok(Mesh {
        center,
        radius,
        rotation_axis: DEFAULT_ROTATION_AXIS,
        density,
        color: Color::CYAN,
        vertices,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_density() {
        assert!(matches!(
            build_sphere(Vec3::ZERO, 75.0, 0),
            Err(Error::InvalidParameter { name: "density_factor", .. })
        ));
        assert!(build_sphere(Vec3::ZERO, 75.0, -3).is_err());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(build_sphere(Vec3::ZERO, 0.0, 1).is_err());
        assert!(build_sphere(Vec3::ZERO, -5.0, 1).is_err());
        assert!(build_sphere(Vec3::ZERO, f64::NAN, 1).is_err());
    }

    #[test]
    fn test_face_count_and_closure() {
        for d in 1..=3 {
            let mesh = build_sphere(Vec3::ZERO, 75.0, d).unwrap();
            let n = 4 * d as usize;
            assert_eq!(mesh.density, n);
            assert_eq!(mesh.faces.len(), n * n);

            // Every vertex appears in exactly 4 faces, once in each corner slot
            let mut roles = vec![[0u32; 4]; n * n];
            for face in &mesh.faces {
                for (slot, &idx) in face.indices.iter().enumerate() {
                    roles[idx][slot] += 1;
                }
            }
            assert!(roles.iter().all(|r| *r == [1, 1, 1, 1]));
        }
    }

    #[test]
    fn test_corner_order_wraps() {
        let mesh = build_sphere(Vec3::ZERO, 75.0, 1).unwrap();
        // Last cell wraps both axes back to (0, 0)
        let last = mesh.faces[15];
        assert_eq!(
            last.indices,
            [mesh.grid_index(3, 3), mesh.grid_index(3, 0), mesh.grid_index(0, 0), mesh.grid_index(0, 3)]
        );
    }

    #[test]
    fn test_vertices_on_sphere_surface() {
        let center = Vec3::new(10.0, -20.0, 5.0);
        let mesh = build_sphere(center, 75.0, 2).unwrap();
        for v in &mesh.vertices {
            assert!(((*v - center).len() - 75.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_column_is_generating_circle() {
        let mesh = build_sphere(Vec3::ZERO, 75.0, 1).unwrap();
        let top = mesh.vertices[mesh.grid_index(0, 0)];
        let side = mesh.vertices[mesh.grid_index(0, 1)];
        assert!((top - Vec3::new(0.0, 75.0, 0.0)).len() < 1e-9);
        assert!((side - Vec3::new(75.0, 0.0, 0.0)).len() < 1e-9);
    }

    #[test]
    fn test_opposite_columns_coincide() {
        let mesh = build_sphere(Vec3::ZERO, 75.0, 1).unwrap();
        for row in 0..4 {
            let a = mesh.vertices[mesh.grid_index(0, row)];
            let b = mesh.vertices[mesh.grid_index(2, row)];
            assert!((a - b).len() < 1e-9);
        }
    }

    #[test]
    fn test_cube_faces() {
        let cube = Mesh::cube(Vec3::ZERO, 1.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 6);
        let front = cube.corners(&cube.faces[0]);
        assert!(front.iter().all(|v| v.z == 1.0));
    }
}

//! Face visibility from an observer
//!
//! One geometric signature, the triple `{a, b, c}`, serves two purposes: with
//! the camera as observer it decides backfaces, with the light as observer it
//! drives the diffuse falloff in [`crate::lighting`].

use crate::rasterizer::Vec3;

/// Signature of a face as seen from an observer point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityTriple {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Approximate face direction: the sum of the four corner displacements from
/// `center`. Not a cross-product normal; it points from the mesh center
/// through the face centroid, scaled by four.
pub fn approximate_normal(center: Vec3, corners: &[Vec3; 4]) -> Vec3 {
    // Corners paired 0/3 and 1/2
    let north = Vec3::between(center, corners[0]) + Vec3::between(center, corners[3]);
    let south = Vec3::between(center, corners[1]) + Vec3::between(center, corners[2]);
    north + south
}

/// Compute the visibility triple of a face for `observer`.
///
/// With `n` the approximate normal:
/// `a = (center - observer)·observer`, `b = (n - center)·n`,
/// `c = (n - observer)·observer`.
pub fn visibility_sample(observer: Vec3, center: Vec3, corners: &[Vec3; 4]) -> VisibilityTriple {
    let normal = approximate_normal(center, corners);

    let to_poly = Vec3::between(observer, normal);
    let to_entity = Vec3::between(observer, center);
    let opposite = Vec3::between(center, normal);

    VisibilityTriple {
        a: to_entity.dot(observer),
        b: opposite.dot(normal),
        c: to_poly.dot(observer),
    }
}

impl VisibilityTriple {
    /// `sqrt(a² + b²)`, the threshold `|c|` must reach for a face to be drawn
    pub fn center_plane(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Backface test for a triple sampled from the camera
    pub fn is_backface(&self) -> bool {
        self.c.abs() < self.center_plane()
    }
}

/// Backface test of a face against the camera position
pub fn is_backface(camera: Vec3, center: Vec3, corners: &[Vec3; 4]) -> bool {
    visibility_sample(camera, center, corners).is_backface()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    #[test]
    fn test_normal_points_through_face() {
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        let front = cube.corners(&cube.faces[0]);
        assert_eq!(approximate_normal(Vec3::ZERO, &front), Vec3::new(0.0, 0.0, 300.0));
    }

    #[test]
    fn test_triple_values() {
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        let front = cube.corners(&cube.faces[0]);
        let eye = Vec3::new(0.0, 0.0, -384.0);
        let t = visibility_sample(eye, Vec3::ZERO, &front);
        assert_eq!(t.a, -147456.0);
        assert_eq!(t.b, 90000.0);
        assert_eq!(t.c, -115200.0 - 147456.0);
    }

    #[test]
    fn test_cube_backfaces_from_distant_camera() {
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        let eye = Vec3::new(0.0, 0.0, -384.0);
        let flags: Vec<bool> = cube
            .faces
            .iter()
            .map(|f| is_backface(eye, cube.center, &cube.corners(f)))
            .collect();
        // Only the face toward +z (toward the projected viewer) survives
        assert_eq!(flags, vec![false, true, true, true, true, true]);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let cube = Mesh::cube(Vec3::ZERO, 1.0);
        let corners = cube.corners(&cube.faces[2]);
        let t1 = visibility_sample(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, &corners);
        let t2 = visibility_sample(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, &corners);
        assert_eq!(t1, t2);
        assert_eq!(t1.b, 16.0);
    }
}

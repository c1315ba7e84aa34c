//! Pinhole camera for perspective projection
//!
//! The camera sits on the z axis looking down -z. Its focal distance is derived
//! once from the field of view and the viewport height.

use super::math::Vec3;
use super::types::Point2;
use crate::error::{Error, Result};

/// Depth band around the camera plane treated as "on the plane"
const DEGENERATE_DEPTH: f64 = 1e-9;

/// Camera state for 3D rendering
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Field of view in radians, in (0, π)
    pub fov: f64,
    /// Screen-space center of projection
    pub center: Point2,
    /// Rounded `viewport_height / tan(fov / 2)`, always positive
    pub focal_distance: f64,
}

impl Camera {
    /// Build a camera for a viewport height and field of view (radians)
    pub fn new(viewport_height: f64, fov: f64) -> Result<Self> {
        if !(fov > 0.0 && fov < std::f64::consts::PI) {
            return Err(Error::invalid("field_of_view", format!("{} rad is outside (0, π)", fov)));
        }
        if !(viewport_height > 0.0 && viewport_height.is_finite()) {
            return Err(Error::invalid("viewport.height", format!("{} must be positive", viewport_height)));
        }
        Ok(Self {
            fov,
            center: Point2::default(),
            focal_distance: focal_distance(viewport_height, fov),
        })
    }

    /// Signed z of the camera plane (`-focal_distance`); the `f` of the projection
    pub fn plane_z(&self) -> f64 {
        -self.focal_distance
    }

    /// Camera position as an observer for visibility tests
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.center.x, self.center.y, self.plane_z())
    }

    /// Project a point to screen space.
    ///
    /// Fails when the point lies on the camera plane (`z + f == 0`).
    pub fn try_project(&self, point: Vec3) -> Result<Point2> {
        let f = self.plane_z();
        let c = self.center;
        let denom = point.z + f;
        if denom.abs() < DEGENERATE_DEPTH {
            return Err(Error::DegenerateGeometry { depth: point.z });
        }
        Ok(Point2 {
            x: (f - c.x) * ((point.x - c.x) / denom) + c.x,
            y: (f - c.y) * ((point.y - c.y) / denom) + c.y,
        })
    }

    /// Project a point to screen space, collapsing points on the camera plane
    /// onto the screen center
    pub fn project(&self, point: Vec3) -> Point2 {
        self.try_project(point).unwrap_or(self.center)
    }
}

/// `round(viewport_height / tan(fov / 2))`
pub fn focal_distance(viewport_height: f64, fov: f64) -> f64 {
    (viewport_height / (fov / 2.0).tan()).round()
}

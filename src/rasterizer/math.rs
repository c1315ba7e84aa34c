//! Vector and quaternion algebra
//!
//! Everything here is a plain value type: operations return new values and
//! never mutate their inputs.

use std::ops::{Add, Neg, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
///
/// Used both for positions and for displacements built with [`Vec3::between`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Displacement from `from` to `to` (not a position)
    pub fn between(from: Vec3, to: Vec3) -> Vec3 {
        Vec3 {
            x: to.x - from.x,
            y: to.y - from.y,
            z: to.z - from.z,
        }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Quaternion `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// A vector as a pure quaternion (`w = 0`)
    pub fn pure(v: Vec3) -> Self {
        Self { w: 0.0, x: v.x, y: v.y, z: v.z }
    }

    /// Rotation quaternion `(cos(angle/2), axis * sin(angle/2))`.
    ///
    /// The axis is used as given. A non-unit axis yields a non-unit quaternion,
    /// and the sandwich product then scales as well as rotates.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = (angle / 2.0).sin_cos();
        Self { w: c, x: axis.x * s, y: axis.y * s, z: axis.z * s }
    }

    /// Conjugate; equal to the inverse for unit quaternions
    pub fn conjugate(self) -> Self {
        Self { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Hamilton product `self * other` (non-commutative)
    pub fn hamilton(self, other: Quaternion) -> Quaternion {
        let (a, b) = (self, other);
        Quaternion {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    /// Sandwich product `q * v * conj(q)` applied to a vector
    pub fn sandwich(self, v: Vec3) -> Vec3 {
        self.hamilton(Quaternion::pure(v))
            .hamilton(self.conjugate())
            .vector()
    }

    /// Vector (imaginary) part
    pub fn vector(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn norm_squared(self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion { w: -self.w, x: -self.x, y: -self.y, z: -self.z }
    }
}

/// Component-wise sum
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    a + b
}

/// 3D dot product
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(b)
}

/// Hamilton product of two quaternions
pub fn hamilton(a: Quaternion, b: Quaternion) -> Quaternion {
    a.hamilton(b)
}

/// Rotate `vector` about `origin` by `angle` radians around `axis`.
///
/// The quaternion is rebuilt on every call; inputs are left untouched.
pub fn rotate(vector: Vec3, origin: Vec3, angle: f64, axis: Vec3) -> Vec3 {
    let q = Quaternion::from_axis_angle(axis, angle);
    q.sandwich(vector - origin) + origin
}

//! Rasterizer constants
//!
//! Default viewport and scene dimensions.

/// Default viewport width
pub const WIDTH: usize = 512;

/// Default viewport height
pub const HEIGHT: usize = 384;

/// Default sphere radius
pub const SPHERE_RADIUS: f64 = 75.0;

/// Default density factor (per-axis vertex count is 4x this)
pub const DENSITY_FACTOR: u32 = 14;

/// Rotation step used when a frame is rendered without an explicit angle (degrees)
pub const DEFAULT_ANGLE_STEP: f64 = 45.0;

/// Stroke alpha for every visible face, independent of lighting
pub const STROKE_ALPHA: f64 = 0.1;

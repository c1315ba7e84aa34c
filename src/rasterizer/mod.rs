//! Software rasterizer for the sphere
//!
//! # Module Organization
//!
//! - `types` - Color, Rgba styles, Point2, Light
//! - `math` - Vec3, Quaternion, rotation
//! - `camera` - Pinhole camera and perspective projection
//! - `render` - Canvas sink trait, Framebuffer and CommandRecorder
//! - `constants` - Viewport and scene defaults

pub mod camera;
pub mod constants;
pub mod math;
pub mod render;
pub mod types;

// Types - core data structures
pub use types::{Color, Light, Point2, Rgba};

// Math - vectors, quaternions and rotation
pub use math::{add, dot, hamilton, rotate, Quaternion, Vec3};

// Camera
pub use camera::{focal_distance, Camera};

// Render - canvas sinks
pub use render::{Canvas, CommandRecorder, DrawCommand, Framebuffer};

// Constants
pub use constants::{HEIGHT, WIDTH};

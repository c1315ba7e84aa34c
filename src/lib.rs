//! QUADSPHERE: a quad-faceted sphere spun with quaternions
//!
//! A UV-sphere is generated from a spherical parametrization, rotated every
//! frame with the quaternion sandwich product, projected through a pinhole
//! camera and shaded by a single light:
//! - Per-face backface test against the camera (no depth sort)
//! - Single-light diffuse falloff with a hard cutoff and banded intensity
//! - Draw calls go to a `Canvas` sink (software framebuffer or recorder)

pub mod config;
pub mod error;
pub mod lighting;
pub mod mesh;
pub mod playback;
pub mod rasterizer;
pub mod scene;
pub mod visibility;

#[cfg(not(target_arch = "wasm32"))]
pub mod export;

pub use config::Config;
pub use error::{Error, Result};
pub use mesh::{build_sphere, Face, Mesh};
pub use playback::{Playback, PlaybackState};
pub use scene::{render_frame, FaceReport, FrameReport, Scene};

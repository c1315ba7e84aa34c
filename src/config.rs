//! Session configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files. Every
//! section has defaults, so a file only needs the values it changes. Settings
//! are read once at start-up and validated before anything is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mesh::DEFAULT_ROTATION_AXIS;
use crate::rasterizer::constants::{DENSITY_FACTOR, HEIGHT, SPHERE_RADIUS, WIDTH};
use crate::rasterizer::{Color, Vec3};

/// Validation limits to keep a config from exhausting memory
pub mod limits {
    /// Largest density factor accepted (the mesh has `(4d)²` faces)
    pub const MAX_DENSITY_FACTOR: i32 = 256;
    /// Largest viewport dimension
    pub const MAX_VIEWPORT: usize = 8192;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: WIDTH, height: HEIGHT }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub density_factor: i32,
    pub radius: f64,
    pub center: Vec3,
    /// Spin axis, used as given (not normalized)
    pub rotation_axis: Vec3,
    pub color: Color,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            density_factor: DENSITY_FACTOR as i32,
            radius: SPHERE_RADIUS,
            center: Vec3::ZERO,
            rotation_axis: DEFAULT_ROTATION_AXIS,
            color: Color::CYAN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub field_of_view_degrees: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { field_of_view_degrees: 90.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: Color,
    pub intensity: f64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames_per_second: f64,
    pub degrees_per_step: f64,
    /// Start playing immediately instead of waiting for a control
    pub autoplay: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { frames_per_second: 60.0, degrees_per_step: 2.0, autoplay: false }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewport: ViewportConfig,
    pub sphere: SphereConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub animation: AnimationConfig,
    /// Color each frame is cleared to
    pub background: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            sphere: SphereConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            animation: AnimationConfig::default(),
            background: Color::BLACK,
        }
    }
}

impl Config {
    /// Field of view in radians
    pub fn fov_radians(&self) -> f64 {
        self.camera.field_of_view_degrees.to_radians()
    }

    /// Reject values the scene cannot be built from
    pub fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        if vp.width == 0 || vp.height == 0 {
            return Err(Error::invalid("viewport", format!("{}x{} has a zero dimension", vp.width, vp.height)));
        }
        if vp.width > limits::MAX_VIEWPORT || vp.height > limits::MAX_VIEWPORT {
            return Err(Error::invalid(
                "viewport",
                format!("{}x{} exceeds {}", vp.width, vp.height, limits::MAX_VIEWPORT),
            ));
        }

        let sphere = &self.sphere;
        if sphere.density_factor <= 0 {
            return Err(Error::invalid("density_factor", format!("{} must be positive", sphere.density_factor)));
        }
        if sphere.density_factor > limits::MAX_DENSITY_FACTOR {
            return Err(Error::invalid(
                "density_factor",
                format!("{} exceeds {}", sphere.density_factor, limits::MAX_DENSITY_FACTOR),
            ));
        }
        if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
            return Err(Error::invalid("radius", format!("{} must be positive", sphere.radius)));
        }
        if !sphere.center.is_finite() {
            return Err(Error::invalid("center", "must be finite"));
        }
        if !sphere.rotation_axis.is_finite() || sphere.rotation_axis.len() == 0.0 {
            return Err(Error::invalid("rotation_axis", "must be finite and non-zero"));
        }

        let fov = self.camera.field_of_view_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(Error::invalid("field_of_view_degrees", format!("{} is outside (0, 180)", fov)));
        }

        if !self.light.intensity.is_finite() {
            return Err(Error::invalid("light.intensity", "must be finite"));
        }

        let anim = &self.animation;
        if !(anim.frames_per_second > 0.0 && anim.frames_per_second.is_finite()) {
            return Err(Error::invalid(
                "frames_per_second",
                format!("{} must be positive", anim.frames_per_second),
            ));
        }
        if !anim.degrees_per_step.is_finite() {
            return Err(Error::invalid("degrees_per_step", "must be finite"));
        }

        Ok(())
    }

    /// Pretty RON text for this config
    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }
}

/// Parse and validate a config from RON text
pub fn config_from_str(s: &str) -> Result<Config> {
    let config: Config = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let config = config_from_str(&contents).map_err(|e| {
        tracing::error!("failed to load config {}: {}", path.display(), e);
        e
    })?;
    tracing::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Save a config as pretty-printed RON
pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    fs::write(path, config.to_ron_string()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.viewport, ViewportConfig { width: 512, height: 384 });
        assert_eq!(config.sphere.density_factor, 14);
        assert_eq!(config.sphere.rotation_axis, Vec3::new(0.704, 0.71, 0.0));
        assert_eq!(config.animation.degrees_per_step, 2.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = config_from_str("(sphere: (density_factor: 1), camera: (field_of_view_degrees: 60.0))").unwrap();
        assert_eq!(config.sphere.density_factor, 1);
        assert_eq!(config.sphere.radius, 75.0);
        assert_eq!(config.camera.field_of_view_degrees, 60.0);
        assert_eq!(config.light, LightConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad = [
            "(sphere: (density_factor: 0))",
            "(sphere: (radius: -1.0))",
            "(sphere: (rotation_axis: (x: 0.0, y: 0.0, z: 0.0)))",
            "(camera: (field_of_view_degrees: 180.0))",
            "(camera: (field_of_view_degrees: 0.0))",
            "(viewport: (width: 0))",
            "(animation: (frames_per_second: 0.0))",
        ];
        for text in bad {
            assert!(
                matches!(config_from_str(text), Err(Error::InvalidParameter { .. })),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(config_from_str("(sphere: "), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sphere.ron");
        let mut config = Config::default();
        config.sphere.color = Color::ORANGE;
        config.animation.autoplay = true;
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(dir.path().join("nope.ron")), Err(Error::Io(_))));
    }
}

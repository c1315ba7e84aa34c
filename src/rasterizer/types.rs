//! Core types for the rasterizer

use super::math::Vec3;
use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TEAL: Color = Color { r: 0, g: 128, b: 128 };
    pub const CYAN: Color = Color { r: 0, g: 255, b: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const PURPLE: Color = Color { r: 128, g: 0, b: 128 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0 };
    pub const ORANGE: Color = Color { r: 255, g: 165, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    /// Named palette, in display order
    pub const PALETTE: [(&'static str, Color); 8] = [
        ("teal", Color::TEAL),
        ("cyan", Color::CYAN),
        ("blue", Color::BLUE),
        ("purple", Color::PURPLE),
        ("yellow", Color::YELLOW),
        ("orange", Color::ORANGE),
        ("white", Color::WHITE),
        ("black", Color::BLACK),
    ];

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a palette color by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Color> {
        Color::PALETTE
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Attach an alpha value, producing a fill/stroke style
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { color: self, alpha }
    }

    /// Convert to [u8; 4] for framebuffer (RGBA, opaque)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Color plus alpha, the unit of fill and stroke styles
///
/// Alpha is kept unclamped so the value a face was shaded with survives intact;
/// sinks clamp it to [0, 1] when compositing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub color: Color,
    pub alpha: f64,
}

impl Rgba {
    /// Canvas style text, e.g. `rgba(0, 255, 255, 0.6)`
    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.color.r, self.color.g, self.color.b, self.alpha)
    }

    /// Alpha as an 8-bit coverage value
    pub fn alpha_u8(self) -> u8 {
        if self.alpha.is_nan() {
            return 0;
        }
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// 2D screen-space point, relative to the camera's screen center
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The single point light of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f64,
}

impl Light {
    /// Light placed relative to the camera's focal distance: `y = f`, `z = f - 30`
    pub fn above_focal_plane(focal_distance: f64, color: Color, intensity: f64) -> Self {
        Self {
            position: Vec3::new(0.0, focal_distance, focal_distance - LIGHT_Z_OFFSET),
            color,
            intensity,
        }
    }
}

/// Pull of the light toward the viewer relative to the focal plane
pub const LIGHT_Z_OFFSET: f64 = 30.0;

impl Default for Light {
    fn default() -> Self {
        Self { position: Vec3::ZERO, color: Color::WHITE, intensity: 1.0 }
    }
}

//! Single-light diffuse shading
//!
//! Faces inside the light's cone get a banded intensity that falls off with
//! the angle between the face and the light; faces outside are left unlit and
//! their outline takes the fill color.

use crate::error::{Error, Result};
use crate::rasterizer::constants::STROKE_ALPHA;
use crate::rasterizer::{Color, Light, Rgba, Vec3};
use crate::visibility::visibility_sample;

/// Widens the cone angle in the falloff ratio so the rim keeps some light
const CONE_SOFTENING: f64 = 0.05;

/// Lift applied after quantization
const INTENSITY_LIFT: f64 = 0.1;

/// Shading result for one face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shading {
    /// Whether the face fell inside the light cone
    pub lit: bool,
    pub intensity: f64,
    pub fill: Color,
    pub stroke: Color,
    pub fill_style: Rgba,
    pub stroke_style: Rgba,
}

/// Radius of the light cone at the face, `sqrt(a² - b²)`.
///
/// Fails with [`Error::DomainUnderflow`] when `a² < b²`.
pub fn light_cone_radius(a: f64, b: f64) -> Result<f64> {
    let radicand = a * a - b * b;
    if radicand < 0.0 {
        return Err(Error::DomainUnderflow { a, b });
    }
    Ok(radicand.sqrt())
}

/// Round to one decimal place (half away from zero).
///
/// Exact binary ties round up here; a decimal formatter may round the same
/// value down, so a band edge can land one step apart from such output.
fn quantize(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Shade a face of a mesh with base color `fill`.
pub fn shade(light: &Light, fill: Color, center: Vec3, corners: &[Vec3; 4]) -> Shading {
    let sample = visibility_sample(light.position, center, corners);
    let a = sample.a.abs();
    let b = sample.b.abs();
    let c = sample.c.abs();

    let max_c = light_cone_radius(a, b).unwrap_or_else(|e| {
        tracing::trace!("{}; treating cone radius as 0", e);
        0.0
    });

    let lit = c <= max_c;
    let (intensity, stroke) = if lit {
        // atan2 equals atan(c / b) for b > 0 and stays finite when b == 0
        let theta = c.atan2(b);
        let min_theta = max_c.atan2(b);
        let falloff = quantize(theta / (min_theta + CONE_SOFTENING));
        (light.intensity - falloff + INTENSITY_LIFT, Color::WHITE)
    } else {
        (0.0, fill)
    };

    Shading {
        lit,
        intensity,
        fill,
        stroke,
        fill_style: fill.with_alpha(intensity),
        stroke_style: stroke.with_alpha(STROKE_ALPHA),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_sphere, Mesh};

    fn scene_light() -> Light {
        Light::above_focal_plane(384.0, Color::WHITE, 1.0)
    }

    #[test]
    fn test_cone_radius_underflow() {
        assert_eq!(light_cone_radius(5.0, 3.0).unwrap(), 4.0);
        assert!(matches!(light_cone_radius(3.0, 5.0), Err(Error::DomainUnderflow { .. })));
    }

    #[test]
    fn test_face_toward_light_is_lit() {
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        let top = cube.corners(&cube.faces[2]);
        let s = shade(&scene_light(), Color::CYAN, Vec3::ZERO, &top);
        assert!((s.intensity - 0.3).abs() < 1e-9);
        assert_eq!(s.stroke, Color::WHITE);
        assert_eq!(s.fill, Color::CYAN);
        assert_eq!(s.stroke_style.alpha, 0.1);
        assert_eq!(s.fill_style, Color::CYAN.with_alpha(s.intensity));
        assert!(s.lit);
    }

    #[test]
    fn test_face_away_from_light_is_unlit() {
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        let bottom = cube.corners(&cube.faces[3]);
        let s = shade(&scene_light(), Color::CYAN, Vec3::ZERO, &bottom);
        assert_eq!(s.intensity, 0.0);
        assert_eq!(s.stroke, s.fill);
        assert_eq!(s.fill_style.to_css(), "rgba(0, 255, 255, 0)");
        assert_eq!(s.stroke_style.to_css(), "rgba(0, 255, 255, 0.1)");
        assert!(!s.lit);
    }

    #[test]
    fn test_underflow_does_not_produce_nan() {
        // Light almost at the center: b dwarfs a
        let light = Light { position: Vec3::new(0.0, 1.0, 0.0), ..scene_light() };
        let cube = Mesh::cube(Vec3::ZERO, 75.0);
        for face in &cube.faces {
            let s = shade(&light, Color::CYAN, Vec3::ZERO, &cube.corners(face));
            assert!(s.intensity.is_finite());
            assert_eq!(s.intensity, 0.0);
        }
    }

    #[test]
    fn test_intensity_range_over_sphere() {
        let light = scene_light();
        let mesh = build_sphere(Vec3::ZERO, 75.0, 3).unwrap();
        let mut lit = 0;
        for face in &mesh.faces {
            let s = shade(&light, mesh.color, mesh.center, &mesh.corners(face));
            if s.lit {
                lit += 1;
                assert!(s.intensity >= light.intensity - 1.0 - 1e-9);
                assert!(s.intensity <= light.intensity + 0.1 + 1e-9);
            } else {
                assert_eq!(s.intensity, 0.0);
                assert_eq!(s.stroke, s.fill);
            }
        }
        assert!(lit > 0 && lit < mesh.faces.len());
    }

    #[test]
    fn test_degenerate_normal_uses_atan2() {
        // Corner displacements cancel, so the normal and b are zero
        let corners = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ];
        let s = shade(&scene_light(), Color::CYAN, Vec3::ZERO, &corners);
        assert!(s.lit);
        assert!(s.intensity.is_finite());
        // Both angles are π/2: falloff rounds to 1.0
        assert!((s.intensity - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_cone_edge_is_lit() {
        // a = -5, b = 3, c = -4, so |c| lands exactly on sqrt(a² - b²) = 4
        let light = Light { position: Vec3::new(1.0, 2.0, 0.0), color: Color::WHITE, intensity: 1.0 };
        let corners = [Vec3::new(-0.25, 0.25, 0.25); 4];
        let sample = visibility_sample(light.position, Vec3::ZERO, &corners);
        assert_eq!((sample.a, sample.b, sample.c), (-5.0, 3.0, -4.0));
        assert_eq!(light_cone_radius(5.0, 3.0).unwrap(), 4.0);

        let s = shade(&light, Color::CYAN, Vec3::ZERO, &corners);
        assert!(s.lit);
        assert_eq!(s.stroke, Color::WHITE);
        // theta == min_theta: 0.927 / 0.977 rounds to 0.9
        assert!((s.intensity - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_quantize_bands() {
        assert_eq!(quantize(0.8187), 0.8);
        assert_eq!(quantize(0.25), 0.3);
        assert_eq!(quantize(0.04), 0.0);
        // Binary tie rounds up
        assert_eq!(quantize(0.35), 0.4);
    }
}

//! Frame rendering
//!
//! One frame: spin every vertex of the mesh by a fixed step, project each quad,
//! run the backface test against the camera, shade the survivors and hand the
//! draw calls to a canvas. Faces are issued in mesh order; there is no depth
//! sort.

use crate::config::Config;
use crate::error::Result;
use crate::lighting::{shade, Shading};
use crate::mesh::{build_sphere, Mesh};
use crate::rasterizer::constants::DEFAULT_ANGLE_STEP;
use crate::rasterizer::{rotate, Camera, Canvas, Color, Light, Point2};
use crate::visibility::is_backface;

/// What happened to one face during a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FaceReport {
    /// Projected corners, in path order
    pub screen: [Point2; 4],
    pub backface: bool,
    /// Present for faces that were filled and stroked
    pub shading: Option<Shading>,
}

/// Summary of a rendered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Rotation applied this frame (degrees)
    pub angle_degrees: f64,
    pub faces: Vec<FaceReport>,
    /// Corners that fell on the camera plane and were drawn at the screen center
    pub degenerate_points: usize,
}

impl FrameReport {
    pub fn backface_count(&self) -> usize {
        self.faces.iter().filter(|f| f.backface).count()
    }

    pub fn lit_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|f| f.shading.map_or(false, |s| s.lit))
            .count()
    }

    /// Indices of faces flagged as backfaces
    pub fn backfaces(&self) -> Vec<usize> {
        self.faces
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.backface.then_some(i))
            .collect()
    }
}

/// Render one frame of `mesh`, rotating it by `angle_degrees`
/// ([`DEFAULT_ANGLE_STEP`] when `None`).
///
/// Rotation is cumulative: vertex positions in `mesh` are overwritten with
/// their rotated values, so the next call continues from here. Each shared
/// vertex is rotated exactly once per frame.
pub fn render_frame(
    mesh: &mut Mesh,
    camera: &Camera,
    light: &Light,
    background: Color,
    canvas: &mut impl Canvas,
    angle_degrees: Option<f64>,
) -> FrameReport {
    let angle_degrees = angle_degrees.unwrap_or(DEFAULT_ANGLE_STEP);
    let angle = angle_degrees.to_radians();
    let (center, axis) = (mesh.center, mesh.rotation_axis);

    for v in mesh.vertices.iter_mut() {
        *v = rotate(*v, center, angle, axis);
    }

    canvas.clear(background);

    let eye = camera.position();
    let mut report = FrameReport {
        angle_degrees,
        faces: Vec::with_capacity(mesh.faces.len()),
        degenerate_points: 0,
    };

    for face in &mesh.faces {
        let corners = mesh.corners(face);

        canvas.begin_path();
        let mut screen = [Point2::default(); 4];
        for (slot, corner) in corners.iter().enumerate() {
            let p = match camera.try_project(*corner) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!("{}; drawing at screen center", e);
                    report.degenerate_points += 1;
                    camera.center
                }
            };
            screen[slot] = p;
            canvas.line_to(p);
        }
        canvas.close_path();

        let backface = is_backface(eye, center, &corners);
        let shading = if backface {
            None
        } else {
            let lighting = shade(light, mesh.color, center, &corners);
            canvas.set_fill_style(lighting.fill_style);
            canvas.set_stroke_style(lighting.stroke_style);
            canvas.fill();
            canvas.stroke();
            Some(lighting)
        };

        report.faces.push(FaceReport { screen, backface, shading });
    }

    tracing::debug!(
        angle = angle_degrees,
        faces = report.faces.len(),
        backfaces = report.backface_count(),
        lit = report.lit_count(),
        "rendered frame"
    );

    report
}

/// Everything needed to render frames: the mesh plus the fixed camera and light
#[derive(Debug, Clone)]
pub struct Scene {
    pub mesh: Mesh,
    pub camera: Camera,
    pub light: Light,
    pub background: Color,
}

impl Scene {
    pub fn new(mesh: Mesh, camera: Camera, light: Light, background: Color) -> Self {
        Self { mesh, camera, light, background }
    }

    /// Validate `config` and build the mesh, camera and light from it
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let sphere = &config.sphere;
        let mesh = build_sphere(sphere.center, sphere.radius, sphere.density_factor)?
            .with_rotation_axis(sphere.rotation_axis)
            .with_color(sphere.color);

        let camera = Camera::new(config.viewport.height as f64, config.fov_radians())?;
        let light = Light::above_focal_plane(camera.focal_distance, config.light.color, config.light.intensity);

        Ok(Self::new(mesh, camera, light, config.background))
    }

    /// Render one frame rotated by `angle_degrees` (default step when `None`)
    pub fn render_frame(&mut self, canvas: &mut impl Canvas, angle_degrees: Option<f64>) -> FrameReport {
        render_frame(&mut self.mesh, &self.camera, &self.light, self.background, canvas, angle_degrees)
    }

    /// Log a start-up summary of the session
    pub fn log_info(&self, config: &Config) {
        tracing::info!("density: {}", self.mesh.density);
        tracing::info!("animation speed: {} fps", config.animation.frames_per_second);
        tracing::info!("step increment: {}°", config.animation.degrees_per_step);
        tracing::info!(
            "camera: fov {:.1}°, focal distance {}, center ({}, {})",
            self.camera.fov.to_degrees(),
            self.camera.focal_distance,
            self.camera.center.x,
            self.camera.center.y
        );
        tracing::info!(
            "light: position ({}, {}, {}), color {:?}, intensity {}",
            self.light.position.x,
            self.light.position.y,
            self.light.position.z,
            self.light.color,
            self.light.intensity
        );
    }
}

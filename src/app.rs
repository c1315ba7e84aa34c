//! Interactive viewer state
//!
//! Owns the scene, the playback controls and the software framebuffer, maps
//! keys onto the control surface and blits each frame to the window.

use macroquad::prelude::{
    draw_text, draw_texture_ex, is_key_pressed, screen_height, screen_width, DrawTextureParams, FilterMode,
    KeyCode, Texture2D, Vec2, GRAY, WHITE,
};

use quadsphere::rasterizer::constants::DEFAULT_ANGLE_STEP;
use quadsphere::rasterizer::Framebuffer;
use quadsphere::{Config, FrameReport, Playback, Result, Scene};

/// What the main loop should do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

pub struct AppState {
    pub scene: Scene,
    pub playback: Playback,
    pub fb: Framebuffer,
    pub last_report: Option<FrameReport>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let scene = Scene::from_config(config)?;
        let playback = Playback::from_config(&config.animation)?;
        let fb = Framebuffer::new(config.viewport.width, config.viewport.height);
        scene.log_info(config);

        let mut app = Self { scene, playback, fb, last_report: None };
        // First frame is drawn with the default step, before any control is used
        app.last_report = Some(app.playback.step(&mut app.scene, &mut app.fb, Some(DEFAULT_ANGLE_STEP)));
        Ok(app)
    }

    /// Handle controls and advance the clock by `dt` seconds
    pub fn update(&mut self, dt: f64) -> AppAction {
        if is_key_pressed(KeyCode::Escape) {
            return AppAction::Quit;
        }

        if is_key_pressed(KeyCode::Space) {
            if let Err(e) = self.playback.toggle() {
                tracing::warn!("cannot start playback: {}", e);
            }
        }

        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::S) {
            self.playback.pause();
            self.last_report = Some(self.playback.step(&mut self.scene, &mut self.fb, None));
        }

        if let Some(report) = self.playback.tick(dt, &mut self.scene, &mut self.fb) {
            self.last_report = Some(report);
        }

        AppAction::Continue
    }

    /// Blit the framebuffer (letterboxed, aspect preserved) and the status line
    pub fn draw(&self) {
        let texture = Texture2D::from_rgba8(self.fb.width as u16, self.fb.height as u16, &self.fb.pixels);
        texture.set_filter(FilterMode::Nearest);

        let (sw, sh) = (screen_width(), screen_height());
        let scale = (sw / self.fb.width as f32).min(sh / self.fb.height as f32);
        let (draw_w, draw_h) = (self.fb.width as f32 * scale, self.fb.height as f32 * scale);
        let (draw_x, draw_y) = ((sw - draw_w) / 2.0, (sh - draw_h) / 2.0);

        draw_texture_ex(
            &texture,
            draw_x,
            draw_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        let status = match &self.last_report {
            Some(report) => format!(
                "{} | frame {} | {} faces, {} culled, {} lit",
                self.playback.state().label(),
                self.playback.frames(),
                report.faces.len(),
                report.backface_count(),
                report.lit_count()
            ),
            None => self.playback.state().label().to_string(),
        };
        draw_text(&status, 8.0, 18.0, 16.0, GRAY);
        draw_text("space: play/pause   right/s: step   esc: quit", 8.0, sh - 8.0, 16.0, GRAY);
    }
}

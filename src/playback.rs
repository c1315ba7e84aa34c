//! Playback controls
//!
//! The three operations a host may trigger: `step` one frame, `play` at a frame
//! rate, `pause`. A host clock feeds elapsed time to `tick`, which renders the
//! frames that are due while playing. The scene is borrowed per call, so the
//! caller stays the only writer of the mesh.

use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::rasterizer::Canvas;
use crate::scene::{FrameReport, Scene};

/// Most frames a single tick may render when the host falls behind
pub const MAX_CATCH_UP_FRAMES: usize = 4;

/// Whether frames are being produced on the clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing { fps: f64 },
}

impl PlaybackState {
    /// Target frame time in seconds (None = paused)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            PlaybackState::Paused => None,
            PlaybackState::Playing { fps } => Some(1.0 / fps),
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Paused => "paused",
            PlaybackState::Playing { .. } => "playing",
        }
    }
}

/// Frame stepping state
#[derive(Debug, Clone)]
pub struct Playback {
    state: PlaybackState,
    /// Rotation per step (degrees)
    pub degrees_per_step: f64,
    /// Rate `play` falls back to when toggled
    pub default_fps: f64,
    accumulator: f64,
    frames: u64,
}

impl Playback {
    pub fn new(degrees_per_step: f64, default_fps: f64) -> Self {
        Self {
            state: PlaybackState::Paused,
            degrees_per_step,
            default_fps,
            accumulator: 0.0,
            frames: 0,
        }
    }

    pub fn from_config(config: &AnimationConfig) -> Result<Self> {
        let mut playback = Self::new(config.degrees_per_step, config.frames_per_second);
        if config.autoplay {
            playback.play(config.frames_per_second)?;
        }
        Ok(playback)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Frames rendered so far, by any means
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render one frame rotated by `angle_degrees`, or by the step increment
    pub fn step(&mut self, scene: &mut Scene, canvas: &mut impl Canvas, angle_degrees: Option<f64>) -> FrameReport {
        let angle = angle_degrees.unwrap_or(self.degrees_per_step);
        self.frames += 1;
        scene.render_frame(canvas, Some(angle))
    }

    /// Start stepping on the clock at `fps` frames per second
    pub fn play(&mut self, fps: f64) -> Result<()> {
        if !(fps > 0.0 && fps.is_finite()) {
            return Err(Error::invalid("frames_per_second", format!("{} must be positive", fps)));
        }
        if !self.is_playing() {
            self.accumulator = 0.0;
        }
        self.state = PlaybackState::Playing { fps };
        tracing::info!("playing at {} fps", fps);
        Ok(())
    }

    /// Stop stepping on the clock
    pub fn pause(&mut self) {
        if self.is_playing() {
            tracing::info!("paused after {} frames", self.frames);
        }
        self.state = PlaybackState::Paused;
        self.accumulator = 0.0;
    }

    /// Play at the default rate if paused, pause if playing
    pub fn toggle(&mut self) -> Result<()> {
        if self.is_playing() {
            self.pause();
            Ok(())
        } else {
            self.play(self.default_fps)
        }
    }

    /// Advance the clock by `dt` seconds, rendering every frame that is due.
    ///
    /// Returns the report of the last frame rendered, if any. At most
    /// [`MAX_CATCH_UP_FRAMES`] frames are rendered per call; time beyond that
    /// is dropped.
    pub fn tick(&mut self, dt: f64, scene: &mut Scene, canvas: &mut impl Canvas) -> Option<FrameReport> {
        let frame_time = self.state.frame_time()?;
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut last = None;
        let mut rendered = 0;
        while self.accumulator >= frame_time && rendered < MAX_CATCH_UP_FRAMES {
            self.accumulator -= frame_time;
            last = Some(self.step(scene, canvas, None));
            rendered += 1;
        }
        if self.accumulator >= frame_time {
            tracing::debug!("dropping {:.3}s of backlog", self.accumulator);
            self.accumulator %= frame_time;
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::rasterizer::CommandRecorder;

    fn scene() -> Scene {
        let mut config = Config::default();
        config.sphere.density_factor = 1;
        Scene::from_config(&config).unwrap()
    }

    #[test]
    fn test_starts_paused_and_ticks_nothing() {
        let mut scene = scene();
        let mut playback = Playback::new(2.0, 60.0);
        let before = scene.mesh.vertices.clone();
        assert!(playback.tick(1.0, &mut scene, &mut CommandRecorder::new()).is_none());
        assert_eq!(scene.mesh.vertices, before);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_step_uses_increment_by_default() {
        let mut scene = scene();
        let mut playback = Playback::new(2.0, 60.0);
        let report = playback.step(&mut scene, &mut CommandRecorder::new(), None);
        assert_eq!(report.angle_degrees, 2.0);
        let report = playback.step(&mut scene, &mut CommandRecorder::new(), Some(15.0));
        assert_eq!(report.angle_degrees, 15.0);
        assert_eq!(playback.frames(), 2);
    }

    #[test]
    fn test_play_renders_on_schedule() {
        let mut scene = scene();
        let mut rec = CommandRecorder::new();
        let mut playback = Playback::new(2.0, 60.0);
        playback.play(10.0).unwrap();

        assert!(playback.tick(0.05, &mut scene, &mut rec).is_none());
        assert!(playback.tick(0.06, &mut scene, &mut rec).is_some());
        assert_eq!(playback.frames(), 1);

        // A long stall only catches up a bounded number of frames
        playback.tick(10.0, &mut scene, &mut rec);
        assert_eq!(playback.frames(), 1 + MAX_CATCH_UP_FRAMES as u64);
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let mut scene = scene();
        let mut rec = CommandRecorder::new();
        let mut playback = Playback::new(2.0, 60.0);
        playback.toggle().unwrap();
        assert!(playback.is_playing());
        playback.pause();
        assert!(playback.tick(1.0, &mut scene, &mut rec).is_none());
        assert_eq!(playback.frames(), 0);
    }

    #[test]
    fn test_play_rejects_bad_rate() {
        let mut playback = Playback::new(2.0, 60.0);
        assert!(playback.play(0.0).is_err());
        assert!(playback.play(f64::INFINITY).is_err());
        assert!(!playback.is_playing());
    }

    #[test]
    fn test_autoplay_from_config() {
        let mut config = Config::default();
        config.animation.autoplay = true;
        let playback = Playback::from_config(&config.animation).unwrap();
        assert_eq!(playback.state(), PlaybackState::Playing { fps: 60.0 });
    }
}

//! Headless frame export
//!
//! Renders a run of frames into a software framebuffer and writes each one as
//! a PNG (`frame_0000.png`, `frame_0001.png`, ...).

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result};
use crate::playback::Playback;
use crate::rasterizer::Framebuffer;
use crate::scene::Scene;

/// Write the framebuffer to a PNG file
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
    let image = image::RgbaImage::from_raw(fb.width as u32, fb.height as u32, fb.pixels.clone())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "framebuffer size does not match its dimensions",
            ))
        })?;
    image.save(path)?;
    Ok(())
}

/// Render `frames` steps and save them to `dir`. Returns the written paths.
pub fn export_frames<P: AsRef<Path>>(
    scene: &mut Scene,
    playback: &mut Playback,
    width: usize,
    height: usize,
    frames: usize,
    dir: P,
    show_progress: bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let progress = if show_progress {
        let bar = ProgressBar::new(frames as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} frames") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut fb = Framebuffer::new(width, height);
    let mut written = Vec::with_capacity(frames);
    for i in 0..frames {
        playback.step(scene, &mut fb, None);
        let path = dir.join(format!("frame_{:04}.png", i));
        save_png(&fb, &path)?;
        written.push(path);
        progress.inc(1);
    }
    progress.finish_and_clear();

    tracing::info!("exported {} frames to {}", frames, dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_exports_numbered_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.sphere.density_factor = 2;
        config.viewport.width = 64;
        config.viewport.height = 48;

        let mut scene = Scene::from_config(&config).unwrap();
        let mut playback = Playback::from_config(&config.animation).unwrap();
        let paths = export_frames(&mut scene, &mut playback, 64, 48, 3, dir.path(), false).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[2].ends_with("frame_0002.png"));
        let img = image::open(&paths[0]).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (64, 48));
        assert_eq!(playback.frames(), 3);
    }
}

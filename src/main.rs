//! Quad sphere viewer
//!
//! Native builds take a few command-line flags and can render straight to PNG
//! files without opening a window. The web build always starts the viewer
//! with the default configuration.

mod app;

use macroquad::prelude::{clear_background, get_frame_time, next_frame, Conf, BLACK};

use app::{AppAction, AppState};
use quadsphere::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: format!("Quad Sphere v{}", VERSION),
        window_width: config.viewport.width as i32,
        window_height: config.viewport.height as i32,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    }
}

async fn run(config: Config) {
    let mut app = match AppState::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("cannot start viewer: {}", e);
            return;
        }
    };

    loop {
        if app.update(get_frame_time() as f64) == AppAction::Quit {
            break;
        }

        clear_background(BLACK);
        app.draw();
        next_frame().await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::{Path, PathBuf};

    use anyhow::{bail, Context, Result};
    use clap::Parser;

    use quadsphere::config::load_config;
    use quadsphere::export::export_frames;
    use quadsphere::rasterizer::Color;
    use quadsphere::{Config, Playback, Scene};

    #[derive(Parser)]
    #[command(name = "quadsphere", about = "Spin a quad-faceted sphere under a point light")]
    pub struct Cli {
        /// RON config file (defaults are used for anything it leaves out)
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Override the sphere density factor
        #[arg(long)]
        pub density: Option<i32>,

        /// Sphere color by palette name (teal, cyan, blue, purple, yellow, orange, white, black)
        #[arg(long)]
        pub color: Option<String>,

        /// Start playing immediately
        #[arg(long)]
        pub play: bool,

        /// Render frames to PNG files in this directory instead of opening a window
        #[arg(long)]
        pub export: Option<PathBuf>,

        /// Number of frames to export
        #[arg(long, default_value_t = 90)]
        pub frames: usize,
    }

    impl Cli {
        /// Load the config file (if any) and apply flag overrides
        pub fn resolve_config(&self) -> Result<Config> {
            let mut config = match &self.config {
                Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
                None => Config::default(),
            };
            if let Some(density) = self.density {
                config.sphere.density_factor = density;
            }
            if let Some(name) = &self.color {
                config.sphere.color =
                    Color::from_name(name).with_context(|| format!("unknown palette color `{}`", name))?;
            }
            if self.play {
                config.animation.autoplay = true;
            }
            config.validate().context("invalid configuration")?;
            Ok(config)
        }
    }

    /// Render frames headlessly per the flags
    pub fn export(config: &Config, dir: &Path, frames: usize) -> Result<()> {
        if frames == 0 {
            bail!("--frames must be at least 1");
        }
        let mut scene = Scene::from_config(config)?;
        let mut playback = Playback::from_config(&config.animation)?;
        scene.log_info(config);

        let written = export_frames(
            &mut scene,
            &mut playback,
            config.viewport.width,
            config.viewport.height,
            frames,
            dir,
            true,
        )
        .with_context(|| format!("exporting to {}", dir.display()))?;
        println!("wrote {} frames to {}", written.len(), dir.display());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use tracing::Level;
    use tracing_subscriber::EnvFilter;

    // Crash logging goes in first
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = cli::Cli::parse();
    let config = cli.resolve_config()?;

    if let Some(dir) = &cli.export {
        return cli::export(&config, dir, cli.frames);
    }

    macroquad::Window::from_config(window_conf(&config), run(config));
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    let config = Config::default();
    macroquad::Window::from_config(window_conf(&config), run(config));
}

//! Build automation tasks for the quad sphere viewer
//!
//! Usage:
//!   cargo xtask build-web       # Build WASM and stage it with the page loader

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const CRATE_NAME: &str = "quadsphere";
const MQ_JS_BUNDLE: &str = "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for the quad sphere viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build WASM and stage a static site in dist/web
    BuildWeb {
        /// Skip downloading the macroquad JS loader (use a copy already in dist/web)
        #[arg(long)]
        offline: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { offline } => build_web(offline),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Build WASM for web deployment
fn build_web(offline: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");
    let mq_js = dist.join("mq_js_bundle.js");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown", "--bin", CRATE_NAME]),
    )?;

    // Keep a previously downloaded loader across rebuilds
    let cached_loader = if mq_js.exists() { Some(std::fs::read(&mq_js)?) } else { None };

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", CRATE_NAME);
    std::fs::copy(root.join("target/wasm32-unknown-unknown/release").join(&wasm), dist.join(&wasm))
        .with_context(|| format!("copying {}", wasm))?;
    std::fs::copy(root.join("web/index.html"), dist.join("index.html")).context("copying web/index.html")?;

    match cached_loader {
        Some(bytes) => std::fs::write(&mq_js, bytes)?,
        None if offline => anyhow::bail!("--offline given but no mq_js_bundle.js is staged"),
        None => download_file(MQ_JS_BUNDLE, &mq_js)?,
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

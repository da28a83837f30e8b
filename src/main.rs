use clap::Parser;
use log::{error, warn};
use smfview::app::{run_cli, run_gui};
use smfview::io::config::Config;
use std::path::PathBuf;

/// Interactive SMF mesh viewer with flat/Gouraud/Phong shading.
#[derive(Parser)]
#[command(name = "smfview", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    config: Option<PathBuf>,

    /// Mesh file to load, overriding the configuration.
    #[arg(long)]
    mesh: Option<String>,

    /// Render a single frame to an image instead of opening a window.
    #[arg(long)]
    headless: bool,

    /// Output image path for headless mode.
    #[arg(long)]
    output: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{} - using default configuration", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    if let Some(mesh) = cli.mesh {
        config.scene.mesh = mesh;
    }
    if let Some(output) = cli.output {
        config.render.output = output;
    }

    let result = if cli.headless {
        run_cli(config)
    } else {
        run_gui(config)
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

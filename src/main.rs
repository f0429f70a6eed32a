use anyhow::Context;
use clap::Parser;
use log::{error, info};
use tri_raster::app::run_cli;
use tri_raster::io::config::Config;

/// Renders a triangle scene with a software rasterizer.
#[derive(Parser, Debug)]
#[command(name = "tri-raster")]
#[command(about = "Software triangle rasterizer with alpha blending")]
struct Cli {
    /// Scene configuration file (TOML). Uses the built-in scene when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output image path (.ppm or .png). Overrides `render.output`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Overwrite pixels instead of alpha blending.
    #[arg(long)]
    no_blend: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config file: {}", path);
            Config::load(path).with_context(|| format!("Failed to load config '{}'", path))?
        }
        None => {
            info!("Using built-in scene");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.render.output = output.clone();
    }
    if cli.no_blend {
        config.render.blend_enabled = false;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    run_cli(config).map_err(|e| {
        error!("Render failed: {}", e);
        anyhow::Error::new(e).context("Render failed")
    })
}

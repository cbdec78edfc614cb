//! Plexus CLI - render and inspect animated point fields

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{common::SceneOptions, frames, init, render, simulate, sprite};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plexus")]
#[command(about = "Animated point field with proximity lines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default plexus.toml
    Init {
        /// Target file
        #[arg(default_value = "plexus.toml")]
        path: PathBuf,
    },

    /// Simulate a number of frames and render the last one to PNG
    Render {
        #[command(flatten)]
        scene: SceneOptions,

        /// Output image path
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Frames to simulate before capturing
        #[arg(long, default_value = "120")]
        frames: u64,
    },

    /// Render a PNG sequence
    Frames {
        #[command(flatten)]
        scene: SceneOptions,

        /// Output directory
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,

        /// Number of frames to write
        #[arg(long, default_value = "60")]
        count: u64,
    },

    /// Write the point sprite texture
    Sprite {
        /// Path to config file (defaults to ./plexus.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output image path
        #[arg(short, long, default_value = "sprite.png")]
        output: PathBuf,

        /// Sprite size in pixels (overrides dot_size)
        #[arg(long)]
        size: Option<u32>,
    },

    /// Run headless and report line statistics
    Simulate {
        #[command(flatten)]
        scene: SceneOptions,

        /// Frames to simulate
        #[arg(long, default_value = "300")]
        frames: u64,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => init::run(&path),
        Commands::Render {
            scene,
            output,
            frames,
        } => render::run(render::RenderArgs {
            scene,
            output,
            frames,
        }),
        Commands::Frames {
            scene,
            out_dir,
            count,
        } => frames::run(frames::FramesArgs {
            scene,
            out_dir,
            count,
        }),
        Commands::Sprite {
            config,
            output,
            size,
        } => sprite::run(sprite::SpriteArgs {
            config,
            output,
            size,
        }),
        Commands::Simulate {
            scene,
            frames,
            format,
        } => simulate::run(simulate::SimulateArgs {
            scene,
            frames,
            format,
        }),
    }
}

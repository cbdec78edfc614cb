//! Point sprite export command

use super::common::{load_config, sprite_for};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct SpriteArgs {
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    pub size: Option<u32>,
}

pub fn run(args: SpriteArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let sprite = sprite_for(&config, args.size);
    sprite
        .save(&args.output)
        .with_context(|| format!("Failed to write sprite '{}'", args.output.display()))?;

    println!(
        "[sprite] {}x{} {} ({}) -> {}",
        sprite.width(),
        sprite.height(),
        config.dots_color.to_hex_string(),
        if sprite.premultiplied_alpha {
            "premultiplied"
        } else {
            "straight alpha"
        },
        args.output.display()
    );
    Ok(())
}

//! CLI command implementations

pub mod common;
pub mod frames;
pub mod init;
pub mod render;
pub mod simulate;
pub mod sprite;

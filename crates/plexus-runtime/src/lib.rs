//! Plexus Runtime - host loop infrastructure
//!
//! The panel advances one step per `update` call and knows nothing about time.
//! This crate supplies the scheduling around it:
//! - `FrameClock` - fixed-timestep accumulator fed by wall-clock or explicit time
//! - `HostLoop` - runs panel updates headless or in realtime and hands each
//!   frame to a `FrameSink`

mod clock;
mod host;

pub use clock::FrameClock;
pub use host::{FrameSink, HostLoop};

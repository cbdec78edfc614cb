//! Plexus Field - Drifting point field with screen-space proximity lines
//!
//! Provides the per-frame simulation behind the Plexus background:
//! - Injectable random sources for deterministic updates
//! - Chase (exponential approach) and drift (constant speed, bounded) motion
//! - O(N²) screen-space proximity graph with distance-based opacity
//! - Frame cadence control for line rebuilds
//! - `Panel` as the single per-frame entry point for a host render loop

pub mod cadence;
pub mod config;
pub mod lines;
pub mod math;
pub mod motion;
pub mod panel;
pub mod points;
pub mod rand;

pub use cadence::LineCadence;
pub use config::{FieldConfig, MotionKind, ResetKind};
pub use lines::{build_lines, LineSet, Projector, Segment};
pub use math::OpacityCurve;
pub use motion::{ArrivalReset, MotionPolicy};
pub use panel::{FrameContext, Panel, RenderCommands};
pub use points::PointField;
pub use self::rand::{FieldRng, RandomSource, StdRandom};

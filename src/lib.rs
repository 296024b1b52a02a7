//! Soft Walls - a needle pressing into three sticky walls
//!
//! Core modules:
//! - `sim`: Per-tick needle motion, wall stickiness and geometry (no GPU)
//! - `renderer`: wgpu pipelines and draw targets
//! - `settings`: Window, asset and pacing preferences
//! - `error`: Typed startup and rendering failures

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AppError, Result};
pub use settings::{FramePacing, Settings};

/// Scene configuration constants
pub mod consts {
    /// Fixed x coordinates of the three walls (NDC)
    pub const WALL_POSITIONS: [f32; 3] = [-0.5, 0.0, 0.5];

    /// Needle push past the wall surface that makes the wall grab it
    pub const GRAB_THRESHOLD: f32 = 0.1;
    /// Needle retreat past the wall surface that makes a stuck wall let go
    pub const RELEASE_THRESHOLD: f32 = -0.1;
    /// How far behind the needle a stuck wall's dent trails
    pub const STRETCH_OFFSET: f32 = 0.1;

    /// Half height of the slot cut into each wall
    pub const SLOT_HALF_HEIGHT: f32 = 0.25;

    /// Needle shaft
    pub const NEEDLE_TAIL_X: f32 = -4.0;
    pub const NEEDLE_HALF_WIDTH: f32 = 0.05;
    /// Needle tip offsets relative to the displacement
    pub const NEEDLE_TIP_LOWER_X: f32 = -0.6;
    pub const NEEDLE_TIP_UPPER_X: f32 = -0.5;
    pub const NEEDLE_TIP_SHIFT: f32 = 0.5;

    /// Uniform position scale (zoom hook, always 1.0 for now)
    pub const DEFAULT_SCALE: f32 = 1.0;
}

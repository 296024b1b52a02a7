//! Scene simulation
//!
//! Pure per-frame logic, no GPU or windowing dependencies:
//! - Needle phase accumulation and sine displacement
//! - Per-wall stick/free state machine
//! - Triangle-strip geometry for the needle and walls

pub mod geometry;
pub mod state;
pub mod stick;
pub mod tick;

pub use geometry::{BACKGROUND_QUAD, QUAD_VERTEX_COUNT, WALL_VERTEX_COUNT, needle_quad, wall_outline};
pub use state::{SceneState, WALL_COUNT, Wall, WallMaterial};
pub use stick::{Contact, StickState, respond};
pub use tick::{FrameState, WallFrame, tick};

//! wgpu rendering module
//!
//! Flat-color and textured triangle-strip pipelines, one draw target per
//! scene element.

pub mod pipeline;
pub mod targets;
pub mod texture;
pub mod vertex;

pub use pipeline::RenderState;
pub use targets::{TARGET_COUNT, TargetKind};
pub use texture::RgbaImage;

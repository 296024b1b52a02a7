//! Triangle-strip outlines for the scene
//!
//! All positions are in normalized device coordinates.

use glam::Vec2;

use crate::consts::*;

/// Vertex count of a wall outline
pub const WALL_VERTEX_COUNT: usize = 8;
/// Vertex count of the needle and the background
pub const QUAD_VERTEX_COUNT: usize = 4;

/// Full-viewport quad
pub const BACKGROUND_QUAD: [Vec2; QUAD_VERTEX_COUNT] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

/// Outline of a wall whose contact point is pushed by `deformation`.
///
/// The strip runs down the lower lip of the slot, through the dent, out to
/// the right edge of the viewport and back along the upper lip.
pub fn wall_outline(base_x: f32, deformation: f32) -> [Vec2; WALL_VERTEX_COUNT] {
    let dent = Vec2::new(base_x + deformation, 0.0);
    [
        Vec2::new(base_x, -SLOT_HALF_HEIGHT),
        Vec2::new(base_x, -1.0),
        dent,
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        dent,
        Vec2::new(base_x, 1.0),
        Vec2::new(base_x, SLOT_HALF_HEIGHT),
    ]
}

/// Needle quad with its tip at `displacement`
pub fn needle_quad(displacement: f32) -> [Vec2; QUAD_VERTEX_COUNT] {
    [
        Vec2::new(NEEDLE_TAIL_X, -NEEDLE_HALF_WIDTH),
        Vec2::new(NEEDLE_TAIL_X, 0.0),
        Vec2::new(
            NEEDLE_TIP_LOWER_X + displacement + NEEDLE_TIP_SHIFT,
            -NEEDLE_HALF_WIDTH,
        ),
        Vec2::new(NEEDLE_TIP_UPPER_X + displacement + NEEDLE_TIP_SHIFT, 0.0),
    ]
}

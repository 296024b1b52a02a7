//! Per-frame scene update
//!
//! Advances the needle and evaluates every wall against it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{QUAD_VERTEX_COUNT, WALL_VERTEX_COUNT, needle_quad, wall_outline};
use super::state::{SceneState, WALL_COUNT, WallMaterial};
use super::stick::StickState;

/// A wall as it should be drawn this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallFrame {
    pub material: WallMaterial,
    pub stick: StickState,
    pub deformation: f32,
    pub outline: [Vec2; WALL_VERTEX_COUNT],
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    /// Needle tip position (sine of the phase)
    pub displacement: f32,
    pub needle: [Vec2; QUAD_VERTEX_COUNT],
    pub walls: [WallFrame; WALL_COUNT],
}

impl FrameState {
    /// Geometry for an untouched scene (needle at rest, no dents).
    /// Does not evaluate or change any stick state.
    pub fn at_rest(state: &SceneState) -> Self {
        Self {
            displacement: 0.0,
            needle: needle_quad(0.0),
            walls: state.walls.map(|wall| WallFrame {
                material: wall.material,
                stick: wall.stick,
                deformation: 0.0,
                outline: wall_outline(wall.x, 0.0),
            }),
        }
    }
}

/// Advance the scene by `elapsed` seconds.
///
/// The elapsed time is used as-is: no clamping, no smoothing.
pub fn tick(state: &mut SceneState, elapsed: f64) -> FrameState {
    state.phase += elapsed;
    state.ticks += 1;
    let displacement = state.displacement();

    let walls = state.walls.each_mut().map(|wall| {
        let deformation = wall.press(displacement);
        WallFrame {
            material: wall.material,
            stick: wall.stick,
            deformation,
            outline: wall_outline(wall.x, deformation),
        }
    });

    FrameState {
        displacement,
        needle: needle_quad(displacement),
        walls,
    }
}

//! Scene state carried between ticks
//!
//! Only the phase accumulator and the three walls' stick states persist;
//! everything drawn is derived from them each tick.

use serde::{Deserialize, Serialize};

use super::stick::{Contact, StickState, respond};
use crate::consts::WALL_POSITIONS;

/// Number of walls in the scene
pub const WALL_COUNT: usize = WALL_POSITIONS.len();

/// What a wall is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallMaterial {
    /// Textured with the water image
    Water,
    /// Flat yellow
    Yellow,
    /// Flat blue
    Blue,
}

impl WallMaterial {
    /// Materials in wall order (left to right)
    pub const ALL: [WallMaterial; WALL_COUNT] =
        [WallMaterial::Water, WallMaterial::Yellow, WallMaterial::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallMaterial::Water => "water",
            WallMaterial::Yellow => "yellow",
            WallMaterial::Blue => "blue",
        }
    }

    /// Slot of this material in `SceneState::walls`
    pub fn index(&self) -> usize {
        match self {
            WallMaterial::Water => 0,
            WallMaterial::Yellow => 1,
            WallMaterial::Blue => 2,
        }
    }

    pub fn is_textured(&self) -> bool {
        matches!(self, WallMaterial::Water)
    }
}

/// One soft wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Surface position on the x axis (fixed)
    pub x: f32,
    pub material: WallMaterial,
    pub stick: StickState,
    /// Deformation emitted by the last evaluation
    pub deformation: f32,
}

impl Wall {
    pub fn new(x: f32, material: WallMaterial) -> Self {
        Self {
            x,
            material,
            stick: StickState::Free,
            deformation: 0.0,
        }
    }

    /// Evaluate contact with the needle tip at `needle_x`, updating the
    /// stick state. Returns the deformation for this frame.
    pub fn press(&mut self, needle_x: f32) -> f32 {
        let Contact { state, deformation } = respond(self.stick, needle_x - self.x);
        if state != self.stick {
            log::debug!(
                "{} wall at {:.2}: {} -> {}",
                self.material.as_str(),
                self.x,
                self.stick.as_str(),
                state.as_str()
            );
        }
        self.stick = state;
        self.deformation = deformation;
        deformation
    }
}

/// Persistent scene state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneState {
    /// Needle phase accumulator (seconds, unbounded)
    pub phase: f64,
    /// Number of ticks processed
    pub ticks: u64,
    pub walls: [Wall; WALL_COUNT],
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            phase: 0.0,
            ticks: 0,
            walls: std::array::from_fn(|i| Wall::new(WALL_POSITIONS[i], WallMaterial::ALL[i])),
        }
    }

    /// Current needle tip position
    pub fn displacement(&self) -> f32 {
        self.phase.sin() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_walls_are_free() {
        let state = SceneState::new();
        assert_eq!(state.phase, 0.0);
        assert_eq!(state.ticks, 0);
        for (wall, x) in state.walls.iter().zip(WALL_POSITIONS) {
            assert_eq!(wall.x, x);
            assert_eq!(wall.stick, StickState::Free);
            assert_eq!(wall.deformation, 0.0);
        }
    }

    #[test]
    fn test_wall_materials_in_order() {
        let state = SceneState::new();
        assert_eq!(state.walls[0].material, WallMaterial::Water);
        assert_eq!(state.walls[1].material, WallMaterial::Yellow);
        assert_eq!(state.walls[2].material, WallMaterial::Blue);
        for material in WallMaterial::ALL {
            assert_eq!(state.walls[material.index()].material, material);
        }
        assert!(WallMaterial::Water.is_textured());
        assert!(!WallMaterial::Blue.is_textured());
    }

    #[test]
    fn test_wall_press_sequence() {
        // Needle moves 0.0 -> 0.05 -> 0.12 -> 0.0 -> -0.15 around a wall at 0
        let mut wall = Wall::new(0.0, WallMaterial::Yellow);
        let steps = [
            (0.0, StickState::Free, 0.0),
            (0.05, StickState::Free, 0.05),
            (0.12, StickState::Stuck, 0.0),
            (0.0, StickState::Stuck, -0.1),
            (-0.15, StickState::Free, 0.0),
        ];
        for (needle_x, expected_state, expected_deformation) in steps {
            let deformation = wall.press(needle_x);
            assert_eq!(wall.stick, expected_state, "needle at {}", needle_x);
            assert!(
                (deformation - expected_deformation).abs() < 1e-6,
                "needle at {}: got {}",
                needle_x,
                deformation
            );
            assert_eq!(wall.deformation, deformation);
        }
    }
}

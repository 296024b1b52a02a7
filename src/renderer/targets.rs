//! Draw target contents
//!
//! CPU-side vertex data for every draw target, in draw order. The GPU side
//! lives in `pipeline`.

use super::vertex::{ColorVertex, TexturedVertex, colors, flat_vertices, textured_vertices};
use crate::sim::{BACKGROUND_QUAD, FrameState, WALL_COUNT, WALL_VERTEX_COUNT, WallMaterial};

/// Number of draw targets: background, one per wall, needle
pub const TARGET_COUNT: usize = WALL_COUNT + 2;

/// What a draw target shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Background,
    Wall(WallMaterial),
    Needle,
}

impl TargetKind {
    /// Targets in the order they are drawn each frame
    pub const DRAW_ORDER: [TargetKind; TARGET_COUNT] = [
        TargetKind::Background,
        TargetKind::Wall(WallMaterial::Water),
        TargetKind::Wall(WallMaterial::Yellow),
        TargetKind::Wall(WallMaterial::Blue),
        TargetKind::Needle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Background => "background",
            TargetKind::Wall(WallMaterial::Water) => "wall_water",
            TargetKind::Wall(WallMaterial::Yellow) => "wall_yellow",
            TargetKind::Wall(WallMaterial::Blue) => "wall_blue",
            TargetKind::Needle => "needle",
        }
    }

    pub fn shading(&self) -> Shading {
        match self {
            TargetKind::Wall(material) if material.is_textured() => Shading::Textured,
            _ => Shading::Flat,
        }
    }
}

/// Which shader pair a target is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Flat,
    Textured,
}

/// Vertex data for one target
#[derive(Debug, Clone, PartialEq)]
pub enum TargetVertices {
    Flat(Vec<ColorVertex>),
    Textured(Vec<TexturedVertex>),
}

impl TargetVertices {
    pub fn len(&self) -> usize {
        match self {
            TargetVertices::Flat(v) => v.len(),
            TargetVertices::Textured(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TargetVertices::Flat(v) => bytemuck::cast_slice(v),
            TargetVertices::Textured(v) => bytemuck::cast_slice(v),
        }
    }
}

fn wall_color(material: WallMaterial) -> [f32; 4] {
    match material {
        WallMaterial::Yellow => colors::WALL_YELLOW,
        WallMaterial::Blue => colors::WALL_BLUE,
        // Textured; color unused
        WallMaterial::Water => colors::BACKGROUND,
    }
}

/// Vertices for one target in this frame
pub fn target_vertices(kind: TargetKind, frame: &FrameState) -> TargetVertices {
    match kind {
        TargetKind::Background => {
            TargetVertices::Flat(flat_vertices(&BACKGROUND_QUAD, &[colors::BACKGROUND; 4]))
        }
        TargetKind::Needle => TargetVertices::Flat(flat_vertices(&frame.needle, &colors::NEEDLE)),
        TargetKind::Wall(material) => {
            let outline = frame.walls[material.index()].outline;
            match kind.shading() {
                Shading::Textured => TargetVertices::Textured(textured_vertices(&outline)),
                Shading::Flat => TargetVertices::Flat(flat_vertices(
                    &outline,
                    &[wall_color(material); WALL_VERTEX_COUNT],
                )),
            }
        }
    }
}

/// All targets for this frame, in draw order
pub fn scene_targets(frame: &FrameState) -> [(TargetKind, TargetVertices); TARGET_COUNT] {
    TargetKind::DRAW_ORDER.map(|kind| (kind, target_vertices(kind, frame)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SceneState, tick};

    #[test]
    fn test_draw_order() {
        let frame = FrameState::at_rest(&SceneState::new());
        let kinds: Vec<_> = scene_targets(&frame).iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TargetKind::Background,
                TargetKind::Wall(WallMaterial::Water),
                TargetKind::Wall(WallMaterial::Yellow),
                TargetKind::Wall(WallMaterial::Blue),
                TargetKind::Needle,
            ]
        );
    }

    #[test]
    fn test_vertex_counts() {
        let mut state = SceneState::new();
        let frame = tick(&mut state, 0.3);
        for (kind, verts) in scene_targets(&frame) {
            let expected = match kind {
                TargetKind::Wall(_) => 8,
                _ => 4,
            };
            assert_eq!(verts.len(), expected, "{}", kind.label());
        }
    }

    #[test]
    fn test_background_is_constant() {
        let mut state = SceneState::new();
        let rest = target_vertices(TargetKind::Background, &FrameState::at_rest(&state));
        for dt in [0.1, 0.7, 2.0, 5.5] {
            let frame = tick(&mut state, dt);
            let bg = target_vertices(TargetKind::Background, &frame);
            assert_eq!(bg, rest);
        }
        match rest {
            TargetVertices::Flat(v) => {
                let positions: Vec<_> = v.iter().map(|v| v.position).collect();
                assert_eq!(
                    positions,
                    vec![[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]]
                );
                assert!(v.iter().all(|v| v.color == colors::BACKGROUND));
            }
            TargetVertices::Textured(_) => panic!("background must be flat"),
        }
    }

    #[test]
    fn test_only_water_is_textured() {
        let frame = FrameState::at_rest(&SceneState::new());
        for (kind, verts) in scene_targets(&frame) {
            let textured = matches!(verts, TargetVertices::Textured(_));
            assert_eq!(textured, kind == TargetKind::Wall(WallMaterial::Water));
            assert_eq!(kind.shading() == Shading::Textured, textured);
        }
    }

    #[test]
    fn test_wall_vertices_follow_outline() {
        let mut state = SceneState::new();
        let frame = tick(&mut state, 0.05);
        match target_vertices(TargetKind::Wall(WallMaterial::Yellow), &frame) {
            TargetVertices::Flat(v) => {
                assert_eq!(v[2].position, frame.walls[1].outline[2].to_array());
                assert!(v.iter().all(|v| v.color == colors::WALL_YELLOW));
            }
            TargetVertices::Textured(_) => panic!("yellow wall must be flat"),
        }
    }

    #[test]
    fn test_every_wall_target_uses_its_own_outline() {
        let mut state = SceneState::new();
        // Needle between the water and yellow walls, denting both differently
        let frame = tick(&mut state, 0.3);
        for (i, material) in WallMaterial::ALL.into_iter().enumerate() {
            let expected: Vec<[f32; 2]> =
                frame.walls[i].outline.iter().map(|p| p.to_array()).collect();
            let positions: Vec<[f32; 2]> =
                match target_vertices(TargetKind::Wall(material), &frame) {
                    TargetVertices::Flat(v) => v.iter().map(|v| v.position).collect(),
                    TargetVertices::Textured(v) => v.iter().map(|v| v.position).collect(),
                };
            assert_eq!(positions, expected, "{}", material.as_str());
        }
    }

    #[test]
    fn test_needle_vertices_follow_displacement() {
        let mut state = SceneState::new();
        let frame = tick(&mut state, 0.4);
        match target_vertices(TargetKind::Needle, &frame) {
            TargetVertices::Flat(v) => {
                assert!((v[3].position[0] - frame.displacement).abs() < 1e-6);
                assert_eq!(v[2].color, colors::NEEDLE[2]);
            }
            TargetVertices::Textured(_) => panic!("needle must be flat"),
        }
    }

    #[test]
    fn test_byte_sizes() {
        let frame = FrameState::at_rest(&SceneState::new());
        let targets = scene_targets(&frame);
        assert_eq!(targets[0].1.as_bytes().len(), 4 * 24);
        assert_eq!(targets[1].1.as_bytes().len(), 8 * 16);
        assert_eq!(targets[2].1.as_bytes().len(), 8 * 24);
    }
}

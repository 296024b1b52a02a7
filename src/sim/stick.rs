//! Wall stickiness
//!
//! Each wall grabs the needle once it pushes far enough in, then stretches
//! behind it as it withdraws, and only lets go after the needle has pulled
//! back past the release threshold. The gap between the grab and release
//! thresholds is what makes the walls look elastic instead of snapping back.

use serde::{Deserialize, Serialize};

use crate::consts::{GRAB_THRESHOLD, RELEASE_THRESHOLD, STRETCH_OFFSET};

/// Whether a wall is currently holding on to the needle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StickState {
    /// Wall surface only dents while the needle is pressing into it
    #[default]
    Free,
    /// Wall has grabbed the needle and follows it back out
    Stuck,
}

impl StickState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StickState::Free => "free",
            StickState::Stuck => "stuck",
        }
    }
}

/// Outcome of one contact evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// State after this evaluation
    pub state: StickState,
    /// Offset added to the wall's contact point this frame
    pub deformation: f32,
}

/// Evaluate one wall against the needle.
///
/// `delta` is `needle_x - wall_x`. Pure: the caller stores the new state.
pub fn respond(state: StickState, delta: f32) -> Contact {
    match state {
        StickState::Free => {
            if delta > GRAB_THRESHOLD {
                Contact {
                    state: StickState::Stuck,
                    deformation: 0.0,
                }
            } else if delta > 0.0 {
                Contact {
                    state: StickState::Free,
                    deformation: delta,
                }
            } else {
                Contact {
                    state: StickState::Free,
                    deformation: 0.0,
                }
            }
        }
        StickState::Stuck => {
            if delta < RELEASE_THRESHOLD {
                Contact {
                    state: StickState::Free,
                    deformation: 0.0,
                }
            } else if delta - STRETCH_OFFSET < 0.0 {
                Contact {
                    state: StickState::Stuck,
                    deformation: delta - STRETCH_OFFSET,
                }
            } else {
                // Needle is still deep inside: no visible stretch.
                Contact {
                    state: StickState::Stuck,
                    deformation: 0.0,
                }
            }
        }
    }
}

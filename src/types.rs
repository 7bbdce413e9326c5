//! Shared system sets.

use bevy::prelude::*;

/// Ordering of the per-frame systems of the solar-system scene.
///
/// Input (hover, clicks, keys) runs first so selection changes are seen by
/// the animation and camera systems in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSystemSet {
    /// Hover detection and selection input.
    Input,
    /// Body motion, highlight visuals and camera.
    Animate,
}

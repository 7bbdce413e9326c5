//! Rendering systems for the solar-system scene.
//!
//! Everything here lives only while the `SolarSystem` phase is active: the
//! scene is spawned on entry and every entity tagged [`SceneEntity`] is
//! despawned on exit, textures included.

pub mod background;
pub mod bodies;
pub mod highlight;
mod labels;
pub mod orbits;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::flow::AppPhase;
use crate::types::SceneSystemSet;

use self::background::{spawn_lighting, spawn_starfield, twinkle_sparkles};
use self::bodies::{CelestialBodyPlugin, advance_orbits, orbit_moons, spawn_bodies, spin_bodies};
use self::highlight::{HighlightPlugin, apply_hover_scale, detect_hover, update_glow};
use self::labels::draw_hover_label;
use self::orbits::{OrbitPathPlugin, draw_orbit_paths};

pub use self::bodies::BodyVisual;
pub use self::highlight::{HoveredBody, SelectedBody};

/// Marks entities owned by the solar-system scene.
#[derive(Component, Debug, Default)]
pub struct SceneEntity;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CelestialBodyPlugin, HighlightPlugin, OrbitPathPlugin))
            .add_systems(
                OnEnter(AppPhase::SolarSystem),
                (spawn_bodies, spawn_starfield, spawn_lighting),
            )
            .add_systems(OnExit(AppPhase::SolarSystem), despawn_scene)
            .add_systems(Update, detect_hover.in_set(SceneSystemSet::Input))
            .add_systems(
                Update,
                (
                    advance_orbits,
                    spin_bodies,
                    orbit_moons,
                    apply_hover_scale,
                    update_glow,
                    twinkle_sparkles,
                    draw_orbit_paths,
                )
                    .in_set(SceneSystemSet::Animate),
            )
            .add_systems(
                EguiPrimaryContextPass,
                draw_hover_label.run_if(in_state(AppPhase::SolarSystem)),
            );
    }
}

fn despawn_scene(
    mut commands: Commands,
    scene: Query<Entity, With<SceneEntity>>,
    mut hovered: ResMut<HoveredBody>,
) {
    let mut count = 0;
    for entity in &scene {
        commands.entity(entity).despawn();
        count += 1;
    }
    hovered.id = None;
    debug!("Despawned {count} scene entities");
}

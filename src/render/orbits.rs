//! Orbit path rendering using Bevy Gizmos.
//!
//! Orbits are circles in the XZ plane around the Sun. They are only drawn in
//! the overview; once a body is selected they would clutter the close-up.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::content::BodyId;
use crate::render::highlight::SelectedBody;

/// Settings for orbit path rendering.
#[derive(Resource, Debug)]
pub struct OrbitPathSettings {
    pub visible: bool,
    /// Line segments per circle.
    pub segments: u32,
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 128,
            alpha: 0.15,
        }
    }
}

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>()
            .add_systems(Startup, apply_orbit_config);
    }
}

fn apply_orbit_config(config: Option<Res<AppConfig>>, mut settings: ResMut<OrbitPathSettings>) {
    if let Some(config) = config {
        settings.visible = config.visuals.show_orbit_paths;
    }
}

/// Closed polyline of `segments` points on a circle of `radius` in the XZ plane.
pub fn orbit_points(radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(radius * t.cos(), 0.0, radius * t.sin())
        })
        .collect()
}

pub(crate) fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    selected: Res<SelectedBody>,
) {
    if !settings.visible || selected.any() {
        return;
    }

    let color = Color::srgba(1.0, 1.0, 1.0, settings.alpha);
    for id in BodyId::ALL {
        if id.is_star() {
            continue;
        }
        let points = orbit_points(id.data().distance, settings.segments);
        for (i, p0) in points.iter().enumerate() {
            let p1 = points[(i + 1) % points.len()];
            gizmos.line(*p0, p1, color);
        }
    }
}

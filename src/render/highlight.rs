//! Hover and selection state for celestial bodies.
//!
//! Hovering is found by casting the cursor ray against each body's sphere.
//! Hovered bodies grow slightly and show a glow shell; the selected body keeps
//! its glow, and the Sun always glows.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MainCamera;
use crate::content::BodyId;
use crate::render::bodies::{BodyGlow, BodyVisual};

/// Scale of a hovered planet.
pub const HOVER_SCALE: f32 = 1.1;

/// Fraction of the remaining scale change applied per frame.
pub const SCALE_BLEND: f32 = 0.1;

/// Plugin providing hover detection and highlight visuals.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoveredBody>()
            .init_resource::<SelectedBody>();
    }
}

/// Body under the cursor, if any.
#[derive(Resource, Default, Debug)]
pub struct HoveredBody {
    pub id: Option<BodyId>,
}

/// The body the camera is framing; `None` is the overview.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedBody {
    pub id: Option<BodyId>,
}

impl SelectedBody {
    pub fn select(&mut self, id: BodyId) {
        self.id = Some(id);
    }

    pub fn clear(&mut self) {
        self.id = None;
    }

    pub fn is(&self, id: BodyId) -> bool {
        self.id == Some(id)
    }

    pub fn any(&self) -> bool {
        self.id.is_some()
    }
}

/// Distance along a normalized ray to the first hit with a sphere.
pub fn ray_sphere_hit(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let t = if near >= 0.0 { near } else { -b + root };
    (t >= 0.0).then_some(t)
}

/// Nearest body hit by the ray. Each candidate is `(id, center, radius)`.
pub fn pick_body(
    origin: Vec3,
    direction: Vec3,
    candidates: impl IntoIterator<Item = (BodyId, Vec3, f32)>,
) -> Option<BodyId> {
    candidates
        .into_iter()
        .filter_map(|(id, center, radius)| {
            ray_sphere_hit(origin, direction, center, radius).map(|t| (id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Find the body under the cursor.
pub(crate) fn detect_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    bodies: Query<(&BodyVisual, &GlobalTransform)>,
    mut hovered: ResMut<HoveredBody>,
    mut contexts: EguiContexts,
) {
    let over_ui = contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.is_pointer_over_area() || ctx.wants_pointer_input());
    if over_ui {
        hovered.id = None;
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        hovered.id = None;
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        hovered.id = None;
        return;
    };

    let picked = pick_body(
        ray.origin,
        *ray.direction,
        bodies.iter().map(|(visual, global)| {
            (visual.id, global.translation(), visual.size * global.scale().x)
        }),
    );
    if picked != hovered.id {
        hovered.id = picked;
    }
}

/// Ease hovered planets up to [`HOVER_SCALE`] and back.
pub(crate) fn apply_hover_scale(
    hovered: Res<HoveredBody>,
    mut bodies: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in &mut bodies {
        if visual.id.is_star() {
            continue;
        }
        let target = if hovered.id == Some(visual.id) {
            HOVER_SCALE
        } else {
            1.0
        };
        transform.scale = transform.scale.lerp(Vec3::splat(target), SCALE_BLEND);
    }
}

/// Glow shells: always on for the Sun, otherwise while hovered or selected.
pub(crate) fn update_glow(
    hovered: Res<HoveredBody>,
    selected: Res<SelectedBody>,
    mut glows: Query<(&BodyGlow, &mut Visibility)>,
) {
    for (glow, mut visibility) in &mut glows {
        let lit = glow.0.is_star() || hovered.id == Some(glow.0) || selected.is(glow.0);
        let wanted = if lit {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_sphere_front() {
        let t = ray_sphere_hit(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 2.0);
        assert_relative_eq!(t.unwrap(), 8.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_sphere() {
        assert!(ray_sphere_hit(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z, Vec3::ZERO, 2.0).is_none());
        // Sphere behind the ray origin.
        assert!(ray_sphere_hit(Vec3::new(0.0, 0.0, 10.0), Vec3::Z, Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_pick_nearest_body() {
        let picked = pick_body(
            Vec3::new(0.0, 0.0, 50.0),
            Vec3::NEG_Z,
            [
                (BodyId::Sun, Vec3::ZERO, 4.5),
                (BodyId::Earth, Vec3::new(0.0, 0.0, 20.0), 1.15),
                (BodyId::Mars, Vec3::new(10.0, 0.0, 20.0), 0.9),
            ],
        );
        assert_eq!(picked, Some(BodyId::Earth));
    }

    #[test]
    fn test_selected_body_helpers() {
        let mut selected = SelectedBody::default();
        assert!(!selected.any());
        selected.select(BodyId::Saturn);
        assert!(selected.is(BodyId::Saturn));
        selected.clear();
        assert_eq!(selected.id, None);
    }
}

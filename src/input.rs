//! Mouse and keyboard input for the solar-system scene.
//!
//! A left click on a body selects it. Left-drag also orbits the camera, so a
//! press only counts as a click if the cursor barely moved before release.
//! Escape returns to the overview.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::render::{HoveredBody, SelectedBody};
use crate::types::SceneSystemSet;

/// Largest cursor travel, in logical pixels, that still counts as a click.
pub const CLICK_TOLERANCE: f32 = 5.0;

/// Where the current left press started.
#[derive(Resource, Default, Debug)]
pub struct ClickTracker {
    pub pressed_at: Option<Vec2>,
}

impl ClickTracker {
    /// True if a press that started here and ended at `released_at` was a click.
    pub fn is_click(&self, released_at: Vec2) -> bool {
        self.pressed_at
            .is_some_and(|start| start.distance(released_at) <= CLICK_TOLERANCE)
    }
}

/// Plugin providing selection input.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>().add_systems(
            Update,
            (click_to_select, escape_to_overview)
                .after(crate::render::highlight::detect_hover)
                .in_set(SceneSystemSet::Input),
        );
    }
}

/// Select the hovered body on click.
fn click_to_select(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    hovered: Res<HoveredBody>,
    mut tracker: ResMut<ClickTracker>,
    mut selected: ResMut<SelectedBody>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse_buttons.just_pressed(MouseButton::Left) {
        tracker.pressed_at = cursor;
    }

    if mouse_buttons.just_released(MouseButton::Left) {
        let clicked = cursor.is_some_and(|pos| tracker.is_click(pos));
        tracker.pressed_at = None;

        if clicked && let Some(id) = hovered.id {
            if !selected.is(id) {
                info!("Selected {}", id.data().name);
            }
            selected.select(id);
        }
    }
}

fn escape_to_overview(keys: Res<ButtonInput<KeyCode>>, mut selected: ResMut<SelectedBody>) {
    if keys.just_pressed(KeyCode::Escape) && selected.any() {
        debug!("Escape: back to overview");
        selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_travel_is_a_click() {
        let tracker = ClickTracker {
            pressed_at: Some(Vec2::new(100.0, 100.0)),
        };
        assert!(tracker.is_click(Vec2::new(103.0, 102.0)));
        assert!(!tracker.is_click(Vec2::new(140.0, 100.0)));
    }

    #[test]
    fn test_release_without_press_is_not_a_click() {
        assert!(!ClickTracker::default().is_click(Vec2::ZERO));
    }
}

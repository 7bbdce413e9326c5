//! Hover label using egui for text rendering.
//!
//! In the overview, the name of the hovered body floats above it.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::camera::MainCamera;
use crate::render::bodies::BodyVisual;
use crate::render::highlight::{HoveredBody, SelectedBody};

/// Height of the label anchor above the body centre, on top of its size.
pub const LABEL_LIFT: f32 = 1.5;

pub(crate) fn draw_hover_label(
    mut contexts: EguiContexts,
    hovered: Res<HoveredBody>,
    selected: Res<SelectedBody>,
    bodies: Query<(&BodyVisual, &GlobalTransform)>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Result {
    if selected.any() {
        return Ok(());
    }
    let Some(id) = hovered.id else {
        return Ok(());
    };
    let Some((visual, global)) = bodies.iter().find(|(visual, _)| visual.id == id) else {
        return Ok(());
    };
    let Ok((camera, camera_transform)) = camera.single() else {
        return Ok(());
    };

    let anchor = global.translation() + Vec3::Y * (visual.size + LABEL_LIFT);
    let Ok(screen_pos) = camera.world_to_viewport(camera_transform, anchor) else {
        return Ok(());
    };

    let ctx = contexts.ctx_mut()?;
    egui::Area::new(egui::Id::new("hover_label"))
        .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
        .pivot(egui::Align2::CENTER_BOTTOM)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_unmultiplied(49, 46, 129, 205))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(96, 165, 250)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 4))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(id.data().name)
                            .size(20.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                });
        });
    Ok(())
}

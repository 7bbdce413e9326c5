//! egui textures for generated portraits.
//!
//! Decoding a portrait is not free, so each texture is built once per
//! [`PortraitState::revision`] and reused until the image changes.

use bevy::prelude::*;
use bevy_egui::egui;

use crate::portrait::{PortraitKind, PortraitState};

struct CachedTexture {
    revision: u32,
    handle: Option<egui::TextureHandle>,
}

/// Cached textures for the avatar and outro portraits.
#[derive(Resource, Default)]
pub struct PortraitTextures {
    avatar: Option<CachedTexture>,
    outro: Option<CachedTexture>,
}

impl PortraitTextures {
    /// Texture for `state`'s image, decoding it if the image changed.
    pub fn texture(
        &mut self,
        ctx: &egui::Context,
        kind: PortraitKind,
        state: &PortraitState,
    ) -> Option<egui::TextureHandle> {
        let image = state.image.as_ref()?;
        let slot = match kind {
            PortraitKind::Avatar => &mut self.avatar,
            PortraitKind::Outro => &mut self.outro,
        };
        if let Some(cached) = slot.as_ref()
            && cached.revision == state.revision
        {
            return cached.handle.clone();
        }

        let handle = match image.to_rgba() {
            Ok((width, height, rgba)) => {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [width as usize, height as usize],
                    &rgba,
                );
                let name = format!("{kind:?}-portrait-{}", state.revision);
                Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
            }
            Err(err) => {
                warn!("Could not decode {kind:?} portrait: {err}");
                None
            }
        };
        *slot = Some(CachedTexture {
            revision: state.revision,
            handle: handle.clone(),
        });
        handle
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Draw `texture` in a square of `side` points, or a placeholder frame.
pub fn portrait_square(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    side: f32,
    placeholder: impl FnOnce(&mut egui::Ui),
) {
    let size = egui::vec2(side, side);
    match texture {
        Some(texture) => {
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(size)
                    .corner_radius(side * 0.08),
            );
        }
        None => {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(31, 41, 55))
                .stroke(egui::Stroke::new(2.0, egui::Color32::from_rgb(75, 85, 99)))
                .corner_radius(side * 0.08)
                .show(ui, |ui| {
                    ui.set_min_size(size);
                    ui.set_max_size(size);
                    ui.centered_and_justified(placeholder);
                });
        }
    }
}

//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::locale::SlideIcon;

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

/// Run condition for systems that draw icons.
pub fn fonts_ready(init: Res<FontsInitialized>) -> bool {
    init.0
}

// Browse all icons at https://phosphoricons.com/

pub const ROCKET: &str = egui_phosphor::regular::ROCKET_LAUNCH;
pub const CLOSE: &str = egui_phosphor::regular::X;
pub const BACK: &str = egui_phosphor::regular::ARROW_LEFT;
pub const PREVIOUS: &str = egui_phosphor::regular::CARET_LEFT;
pub const NEXT: &str = egui_phosphor::regular::CARET_RIGHT;
pub const HOME: &str = egui_phosphor::regular::HOUSE;
pub const RESTART: &str = egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE;
pub const MAGIC: &str = egui_phosphor::regular::MAGIC_WAND;
pub const USER: &str = egui_phosphor::regular::USER_CIRCLE;
pub const SPINNER: &str = egui_phosphor::regular::SPINNER;
pub const COMPASS: &str = egui_phosphor::regular::COMPASS;
pub const TROPHY: &str = egui_phosphor::regular::TROPHY;

// Mission cards
pub const VIDEO: &str = egui_phosphor::regular::MONITOR_PLAY;
pub const QUIZ: &str = egui_phosphor::regular::BRAIN;
pub const EXTERNAL: &str = egui_phosphor::regular::ARROW_SQUARE_OUT;

// Status
/// Success/check icon
pub const SUCCESS: &str = egui_phosphor::regular::CHECK_CIRCLE;
pub const WARNING: &str = egui_phosphor::regular::WARNING;
pub const WRONG: &str = egui_phosphor::regular::X_CIRCLE;

/// Icon for an academy slide.
pub fn slide_icon(icon: SlideIcon) -> &'static str {
    match icon {
        SlideIcon::Wave => egui_phosphor::regular::HAND_WAVING,
        SlideIcon::Target => egui_phosphor::regular::CROSSHAIR,
        SlideIcon::Orbit => egui_phosphor::regular::PLANET,
        SlideIcon::Spin => egui_phosphor::regular::ARROWS_CLOCKWISE,
        SlideIcon::Moon => egui_phosphor::regular::MOON_STARS,
        SlideIcon::Warning => egui_phosphor::regular::WARNING,
        SlideIcon::Check => egui_phosphor::regular::CHECK_SQUARE,
        SlideIcon::Timer => egui_phosphor::regular::TIMER,
    }
}

//! UI module providing the egui screens.
//!
//! Each phase owns its screen: the avatar creator, the academy slideshow,
//! the solar-system overlay with its quiz window, and the ending.

mod academy;
mod avatar_creator;
mod ending;
pub mod icons;
mod overlay;
pub mod portrait_view;
mod quiz_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::flow::AppPhase;
use crate::types::SceneSystemSet;

pub use academy::{AcademySignal, AcademyState};
pub use avatar_creator::AvatarForm;
pub use portrait_view::PortraitTextures;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<icons::FontsInitialized>()
            .init_resource::<PortraitTextures>()
            .init_resource::<AvatarForm>()
            .add_systems(OnEnter(AppPhase::AvatarCreation), avatar_creator::prepare_avatar_form)
            .add_systems(OnEnter(AppPhase::Academy), academy::start_academy)
            .add_systems(OnEnter(AppPhase::Outro), ending::request_outro)
            .add_systems(
                Update,
                academy::tick_academy.run_if(in_state(AppPhase::Academy)),
            )
            .add_systems(
                Update,
                (quiz_panel::sync_quiz_with_selection, quiz_panel::tick_quiz)
                    .chain()
                    .in_set(SceneSystemSet::Animate),
            )
            .add_systems(
                Update,
                ending::remember_outro.run_if(in_state(AppPhase::Outro)),
            )
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                avatar_creator::avatar_creator_screen
                    .run_if(in_state(AppPhase::AvatarCreation))
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            )
            .add_systems(
                EguiPrimaryContextPass,
                academy::academy_screen
                    .run_if(in_state(AppPhase::Academy))
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    overlay::destinations_menu,
                    overlay::planet_panel,
                    quiz_panel::quiz_window,
                )
                    .chain()
                    .run_if(in_state(AppPhase::SolarSystem))
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            )
            .add_systems(
                EguiPrimaryContextPass,
                ending::ending_screen
                    .run_if(in_state(AppPhase::Outro))
                    .after(icons::setup_fonts)
                    .run_if(icons::fonts_ready),
            );
    }
}

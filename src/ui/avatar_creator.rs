//! Avatar creation screen.
//!
//! The cadet fills in a name and picks how their astronaut looks, then asks
//! for a portrait. Once one is ready they can lift off, straight to the
//! academy or skipping it.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::AppConfig;
use crate::flow::{FlowCommand, Session};
use crate::locale::{LocaleId, Strings};
use crate::portrait::{
    AvatarProfile, Gender, HairColor, HairStyle, Height, Portrait, PortraitKind, PortraitRequests,
    Portraits, avatar_prompt,
};

use super::icons;
use super::portrait_view::{PortraitTextures, portrait_square};

const PREVIEW_SIDE: f32 = 320.0;

mod colors {
    use bevy_egui::egui::Color32;

    pub const BACKDROP: Color32 = Color32::from_rgb(17, 24, 39);
    pub const CARD: Color32 = Color32::from_rgba_premultiplied(31, 41, 55, 230);
    pub const TITLE: Color32 = Color32::from_rgb(96, 165, 250);
    pub const MUTED: Color32 = Color32::from_rgb(156, 163, 175);
    pub const ERROR: Color32 = Color32::from_rgb(248, 113, 113);
    pub const CREATE: Color32 = Color32::from_rgb(37, 99, 235);
    pub const LIFT_OFF: Color32 = Color32::from_rgb(22, 163, 74);
    pub const SKIP: Color32 = Color32::from_rgb(75, 85, 99);
}

/// Draft of the avatar being edited.
#[derive(Resource, Debug, Default, Clone)]
pub struct AvatarForm {
    pub draft: AvatarProfile,
    /// Set when the cadet tried to continue without a name.
    pub name_missing: bool,
}

impl AvatarForm {
    /// Form prefilled from the saved profile, if any.
    pub fn from_session(session: &Session) -> Self {
        Self {
            draft: session.profile.clone().unwrap_or_default(),
            name_missing: false,
        }
    }

    /// Check the name is present, recording the result for display.
    pub fn validate(&mut self) -> bool {
        self.name_missing = self.draft.name.trim().is_empty();
        !self.name_missing
    }

    /// Profile to hand to the flow, carrying the portrait on screen.
    ///
    /// The outro picture only survives if the avatar is still the one it
    /// was drawn from.
    pub fn completed_profile(&self, portrait: Option<Portrait>) -> AvatarProfile {
        let outro = if portrait == self.draft.portrait {
            self.draft.outro.clone()
        } else {
            None
        };
        AvatarProfile {
            name: self.draft.name.trim().to_string(),
            portrait,
            outro,
            ..self.draft.clone()
        }
    }
}

pub(crate) fn prepare_avatar_form(
    mut commands: Commands,
    session: Res<Session>,
    mut portraits: ResMut<Portraits>,
    mut textures: ResMut<PortraitTextures>,
) {
    let form = AvatarForm::from_session(&session);
    if portraits.avatar.image.is_none() && form.draft.portrait.is_some() {
        portraits.avatar.set_image(form.draft.portrait.clone());
    }
    textures.clear();
    commands.insert_resource(form);
}

pub(crate) fn avatar_creator_screen(
    mut contexts: EguiContexts,
    mut form: ResMut<AvatarForm>,
    mut portraits: ResMut<Portraits>,
    mut requests: ResMut<PortraitRequests>,
    mut textures: ResMut<PortraitTextures>,
    mut flow_commands: MessageWriter<FlowCommand>,
    config: Res<AppConfig>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let locale = config.locale;
    let strings = locale.strings();
    let texture = textures.texture(ctx, PortraitKind::Avatar, &portraits.avatar);

    egui::CentralPanel::default()
        .frame(
            egui::Frame::NONE
                .fill(colors::BACKDROP)
                .inner_margin(egui::Margin::same(32)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{} {}", icons::ROCKET, strings.app_title))
                        .size(44.0)
                        .strong()
                        .color(colors::TITLE),
                );
                ui.label(
                    egui::RichText::new(strings.avatar_subtitle)
                        .size(20.0)
                        .color(colors::MUTED),
                );
            });
            ui.add_space(24.0);

            ui.columns(2, |columns| {
                card(&mut columns[0], |ui| {
                    let create = form_fields(ui, &mut form, locale, strings, portraits.avatar.loading);
                    if create && form.validate() {
                        let prompt = avatar_prompt(&form.draft);
                        portraits.request(&mut requests, PortraitKind::Avatar, &config.portrait, prompt);
                    }
                });

                card(&mut columns[1], |ui| {
                    ui.vertical_centered(|ui| {
                        let avatar = &portraits.avatar;
                        if avatar.loading {
                            portrait_square(ui, None, PREVIEW_SIDE, |ui| {
                                ui.vertical_centered(|ui| {
                                    ui.add(egui::Spinner::new().size(48.0));
                                    ui.label(strings.generating);
                                });
                            });
                        } else {
                            portrait_square(ui, texture.as_ref(), PREVIEW_SIDE, |ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{}\n{}",
                                        icons::USER,
                                        strings.avatar_placeholder
                                    ))
                                    .size(18.0)
                                    .color(colors::MUTED),
                                );
                            });
                        }

                        if avatar.error.is_some() {
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new(format!("{} {}", icons::WARNING, strings.generation_failed))
                                    .color(colors::ERROR),
                            );
                        }

                        if avatar.image.is_some() && !avatar.loading {
                            ui.add_space(16.0);
                            if let Some(skip_academy) = launch_buttons(ui, strings)
                                && form.validate()
                            {
                                let profile = form.completed_profile(avatar.image.clone());
                                info!("Avatar ready for {}", profile.name);
                                flow_commands.write(FlowCommand::AvatarCompleted {
                                    profile,
                                    skip_academy,
                                });
                            }
                        }
                    });
                });
            });
        });
    Ok(())
}

fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::NONE
        .fill(colors::CARD)
        .corner_radius(20.0)
        .inner_margin(egui::Margin::same(24))
        .show(ui, add_contents);
}

/// Draw the attribute fields. Returns true if "create avatar" was clicked.
fn form_fields(
    ui: &mut egui::Ui,
    form: &mut AvatarForm,
    locale: LocaleId,
    strings: &Strings,
    busy: bool,
) -> bool {
    ui.label(egui::RichText::new(strings.name_label).strong());
    let name = ui.add(
        egui::TextEdit::singleline(&mut form.draft.name)
            .hint_text(strings.name_hint)
            .desired_width(f32::INFINITY)
            .font(egui::TextStyle::Heading),
    );
    if name.changed() && !form.draft.name.trim().is_empty() {
        form.name_missing = false;
    }
    if form.name_missing {
        ui.label(egui::RichText::new(strings.name_required).color(colors::ERROR));
    }
    ui.add_space(12.0);

    choice_row(ui, strings.gender_label, &mut form.draft.gender, &Gender::ALL, |g| g.label(locale));
    choice_row(ui, strings.height_label, &mut form.draft.height, &Height::ALL, |h| h.label(locale));
    choice_row(ui, strings.hair_color_label, &mut form.draft.hair_color, &HairColor::ALL, |c| {
        c.label(locale)
    });
    choice_row(ui, strings.hair_style_label, &mut form.draft.hair_style, &HairStyle::ALL, |s| {
        s.label(locale)
    });

    ui.add_space(20.0);
    let label = if busy {
        strings.generating
    } else {
        strings.create_avatar
    };
    let button = egui::Button::new(
        egui::RichText::new(format!("{} {label}", icons::MAGIC))
            .size(20.0)
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(colors::CREATE)
    .corner_radius(12.0)
    .min_size(egui::vec2(ui.available_width(), 44.0));
    ui.add_enabled(!busy, button).clicked()
}

fn choice_row<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    heading: &str,
    value: &mut T,
    options: &[T],
    label: impl Fn(T) -> &'static str,
) {
    ui.label(egui::RichText::new(heading).strong());
    ui.horizontal_wrapped(|ui| {
        for &option in options {
            ui.selectable_value(value, option, label(option));
        }
    });
    ui.add_space(8.0);
}

/// Returns `Some(skip_academy)` when one of the launch buttons was clicked.
fn launch_buttons(ui: &mut egui::Ui, strings: &Strings) -> Option<bool> {
    let lift_off = egui::Button::new(
        egui::RichText::new(format!("{} {}", icons::ROCKET, strings.lift_off))
            .size(20.0)
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(colors::LIFT_OFF)
    .corner_radius(12.0)
    .min_size(egui::vec2(PREVIEW_SIDE, 44.0));
    if ui.add(lift_off).clicked() {
        return Some(false);
    }

    ui.add_space(6.0);
    let skip = egui::Button::new(egui::RichText::new(strings.skip_academy).size(16.0))
        .fill(colors::SKIP)
        .corner_radius(12.0)
        .min_size(egui::vec2(PREVIEW_SIDE, 36.0));
    if ui.add(skip).clicked() {
        return Some(true);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::cadet;

    fn portrait(data: &str) -> Portrait {
        Portrait {
            png_base64: data.to_string(),
        }
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let mut form = AvatarForm::default();
        form.draft.name = "   ".to_string();
        assert!(!form.validate());
        assert!(form.name_missing);

        form.draft.name = "Laia".to_string();
        assert!(form.validate());
        assert!(!form.name_missing);
    }

    #[test]
    fn test_form_prefills_from_saved_profile() {
        let session = Session {
            profile: Some(cadet("Pau")),
        };
        let form = AvatarForm::from_session(&session);
        assert_eq!(form.draft.name, "Pau");
        assert_eq!(form.draft.hair_style, HairStyle::Curly);
    }

    #[test]
    fn test_completed_profile_trims_name_and_attaches_portrait() {
        let mut form = AvatarForm::default();
        form.draft = cadet("  Nil ");
        let profile = form.completed_profile(Some(portrait("AAAA")));
        assert_eq!(profile.name, "Nil");
        assert_eq!(profile.portrait, Some(portrait("AAAA")));
        assert_eq!(profile.hair_color, HairColor::Brown);
    }

    #[test]
    fn test_outro_dropped_when_avatar_regenerated() {
        let mut saved = cadet("Aina");
        saved.portrait = Some(portrait("OLD"));
        saved.outro = Some(portrait("GATE"));
        let form = AvatarForm::from_session(&Session {
            profile: Some(saved),
        });

        let same = form.completed_profile(Some(portrait("OLD")));
        assert_eq!(same.outro, Some(portrait("GATE")));

        let regenerated = form.completed_profile(Some(portrait("NEW")));
        assert_eq!(regenerated.outro, None);
    }
}

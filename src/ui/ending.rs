//! Ending screen: score, farewell picture and restart.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::AppConfig;
use crate::flow::{FlowCommand, Session};
use crate::locale::with_name;
use crate::portrait::{PortraitKind, PortraitRequests, Portraits, outro_prompt};
use crate::quiz::QuizResults;
use crate::storage::ProfileStore;

use super::icons;
use super::portrait_view::{PortraitTextures, portrait_square};

const PICTURE_SIDE: f32 = 420.0;

mod colors {
    use bevy_egui::egui::Color32;

    pub const BACKDROP: Color32 = Color32::from_rgb(59, 130, 246);
    pub const CARD: Color32 = Color32::from_rgba_premultiplied(230, 230, 230, 230);
    pub const TITLE: Color32 = Color32::from_rgb(49, 46, 129);
    pub const TEXT: Color32 = Color32::from_rgb(55, 65, 81);
    pub const SCORE_CARD: Color32 = Color32::from_rgb(224, 231, 255);
    pub const SCORE: Color32 = Color32::from_rgb(22, 163, 74);
    pub const WELCOME: Color32 = Color32::from_rgb(49, 46, 129);
    pub const RESTART: Color32 = Color32::from_rgb(79, 70, 229);
}

/// Show the saved farewell picture, or ask for one.
pub(crate) fn request_outro(
    session: Res<Session>,
    config: Res<AppConfig>,
    mut portraits: ResMut<Portraits>,
    mut requests: ResMut<PortraitRequests>,
) {
    let Some(profile) = &session.profile else {
        return;
    };
    if let Some(outro) = &profile.outro {
        debug!("Reusing saved outro picture");
        portraits.outro.set_image(Some(outro.clone()));
        return;
    }
    if portraits.outro.loading {
        return;
    }
    let prompt = outro_prompt(profile, &config.school_name);
    portraits.request(&mut requests, PortraitKind::Outro, &config.portrait, prompt);
}

/// Keep a freshly generated farewell picture with the saved profile.
pub(crate) fn remember_outro(
    portraits: Res<Portraits>,
    store: Res<ProfileStore>,
    mut session: ResMut<Session>,
) {
    if !portraits.is_changed() {
        return;
    }
    let Some(image) = &portraits.outro.image else {
        return;
    };
    let Some(profile) = session.profile.as_mut() else {
        return;
    };
    if profile.outro.as_ref() == Some(image) {
        return;
    }
    profile.outro = Some(image.clone());
    if let Err(err) = store.save(profile) {
        warn!("Could not save outro picture: {err}");
    }
}

pub(crate) fn ending_screen(
    mut contexts: EguiContexts,
    mut textures: ResMut<PortraitTextures>,
    mut flow_commands: MessageWriter<FlowCommand>,
    portraits: Res<Portraits>,
    session: Res<Session>,
    results: Res<QuizResults>,
    config: Res<AppConfig>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let strings = config.locale.strings();
    let outro = textures.texture(ctx, PortraitKind::Outro, &portraits.outro);
    let avatar = textures.texture(ctx, PortraitKind::Avatar, &portraits.avatar);
    let score = results.score();
    let name = session.pilot_name().unwrap_or_default();

    egui::CentralPanel::default()
        .frame(
            egui::Frame::NONE
                .fill(colors::BACKDROP)
                .inner_margin(egui::Margin::same(32)),
        )
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space((ui.available_height() * 0.08).max(8.0));
                egui::Frame::NONE
                    .fill(colors::CARD)
                    .corner_radius(24.0)
                    .inner_margin(egui::Margin::same(32))
                    .show(ui, |ui| {
                        ui.set_max_width(1000.0);
                        ui.columns(2, |columns| {
                            let ui = &mut columns[0];
                            ui.label(
                                egui::RichText::new(strings.ending_title)
                                    .size(36.0)
                                    .strong()
                                    .color(colors::TITLE),
                            );
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new(with_name(strings.ending_body, name))
                                    .size(18.0)
                                    .color(colors::TEXT),
                            );
                            ui.add_space(16.0);

                            egui::Frame::NONE
                                .fill(colors::SCORE_CARD)
                                .corner_radius(16.0)
                                .inner_margin(egui::Margin::same(20))
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.label(
                                        egui::RichText::new(strings.result_heading)
                                            .size(22.0)
                                            .strong()
                                            .color(colors::TITLE),
                                    );
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} / {} {}",
                                            score.correct,
                                            score.display_total(),
                                            icons::TROPHY
                                        ))
                                        .size(44.0)
                                        .strong()
                                        .color(colors::SCORE),
                                    );
                                    ui.label(egui::RichText::new(strings.correct_answers).color(colors::TEXT));
                                });
                            ui.add_space(20.0);

                            let restart = egui::Button::new(
                                egui::RichText::new(format!("{} {}", strings.restart, icons::ROCKET))
                                    .size(20.0)
                                    .strong()
                                    .color(egui::Color32::WHITE),
                            )
                            .fill(colors::RESTART)
                            .corner_radius(12.0)
                            .min_size(egui::vec2(260.0, 52.0));
                            if ui.add(restart).clicked() {
                                info!("Restarting from the ending screen");
                                flow_commands.write(FlowCommand::Restart);
                            }

                            let ui = &mut columns[1];
                            if portraits.outro.loading {
                                portrait_square(ui, None, PICTURE_SIDE, |ui| {
                                    ui.vertical_centered(|ui| {
                                        ui.add(egui::Spinner::new().size(56.0));
                                        ui.label(egui::RichText::new(strings.preparing_welcome).strong());
                                    });
                                });
                            } else if outro.is_some() {
                                portrait_square(ui, outro.as_ref(), PICTURE_SIDE, |_| {});
                            } else {
                                let school = config.school_name.as_str();
                                portrait_square(ui, None, PICTURE_SIDE, |ui| {
                                    ui.vertical_centered(|ui| {
                                        ui.label(
                                            egui::RichText::new(format!(
                                                "{}\n{} {school}!",
                                                icons::HOME,
                                                strings.welcome_to
                                            ))
                                            .size(22.0)
                                            .strong()
                                            .color(colors::WELCOME),
                                        );
                                        if let Some(avatar) = &avatar {
                                            ui.add_space(12.0);
                                            ui.add(
                                                egui::Image::new(avatar)
                                                    .fit_to_exact_size(egui::vec2(128.0, 128.0))
                                                    .corner_radius(64.0),
                                            );
                                        }
                                    });
                                });
                            }
                        });
                    });
            });
        });
    Ok(())
}

//! Solar-system overlay panels.
//!
//! In the overview a destinations menu lists every body. With a body
//! selected the menu gives way to the planet panel: a back button, the info
//! card and the two mission cards.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::AppConfig;
use crate::content::{BodyData, BodyId};
use crate::flow::{FlowCommand, Session};
use crate::locale::Strings;
use crate::portrait::{PortraitKind, Portraits};
use crate::quiz::{ActiveQuiz, QuizResults};
use crate::render::SelectedBody;

use super::icons;
use super::portrait_view::PortraitTextures;

const MENU_WIDTH: f32 = 240.0;
const PANEL_WIDTH: f32 = 420.0;

mod colors {
    use bevy_egui::egui::Color32;

    pub const PILOT_CARD: Color32 = Color32::from_rgba_premultiplied(49, 46, 129, 205);
    pub const PILOT_BORDER: Color32 = Color32::from_rgb(99, 102, 241);
    pub const PILOT_LABEL: Color32 = Color32::from_rgb(165, 180, 252);
    pub const HEADING: Color32 = Color32::from_rgb(250, 204, 21);
    pub const ENTRY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);
    pub const DONE: Color32 = Color32::from_rgb(74, 222, 128);
    pub const HOME: Color32 = Color32::from_rgb(220, 38, 38);
    pub const INFO_CARD: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 205);
    pub const TEXT: Color32 = Color32::from_rgb(229, 231, 235);
    pub const VIDEO_CARD: Color32 = Color32::from_rgba_premultiplied(124, 45, 18, 230);
    pub const VIDEO_ACCENT: Color32 = Color32::from_rgb(253, 186, 116);
    pub const QUIZ_CARD: Color32 = Color32::from_rgba_premultiplied(49, 46, 129, 230);
    pub const QUIZ_ACCENT: Color32 = Color32::from_rgb(165, 180, 252);
    pub const BACK: Color32 = Color32::from_rgba_premultiplied(40, 40, 40, 60);
}

fn body_color(data: &BodyData) -> egui::Color32 {
    let [r, g, b] = data.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Label on the quiz mission card's call to action.
pub fn quiz_call_to_action(data: &BodyData, strings: &'static Strings) -> &'static str {
    if data.external_quiz_url.is_some() {
        strings.open_external_quiz
    } else {
        strings.start_quiz
    }
}

pub(crate) fn destinations_menu(
    mut contexts: EguiContexts,
    mut selected: ResMut<SelectedBody>,
    mut flow_commands: MessageWriter<FlowCommand>,
    mut textures: ResMut<PortraitTextures>,
    portraits: Res<Portraits>,
    session: Res<Session>,
    results: Res<QuizResults>,
    config: Res<AppConfig>,
) -> Result {
    if selected.any() {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;
    let strings = config.locale.strings();
    let avatar = textures.texture(ctx, PortraitKind::Avatar, &portraits.avatar);

    egui::Area::new(egui::Id::new("destinations_menu"))
        .anchor(egui::Align2::LEFT_TOP, [16.0, 80.0])
        .show(ctx, |ui| {
            ui.set_width(MENU_WIDTH);

            egui::Frame::NONE
                .fill(colors::PILOT_CARD)
                .stroke(egui::Stroke::new(1.0, colors::PILOT_BORDER))
                .corner_radius(12.0)
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(MENU_WIDTH - 24.0);
                    ui.horizontal(|ui| {
                        if let Some(texture) = &avatar {
                            ui.add(
                                egui::Image::new(texture)
                                    .fit_to_exact_size(egui::vec2(48.0, 48.0))
                                    .corner_radius(24.0),
                            );
                        }
                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(strings.pilot).size(12.0).color(colors::PILOT_LABEL));
                            let name = session.pilot_name().unwrap_or(strings.exploring);
                            ui.label(egui::RichText::new(name).strong().color(egui::Color32::WHITE));
                        });
                    });
                });

            ui.add_space(12.0);
            ui.label(
                egui::RichText::new(format!("{} {}", icons::COMPASS, strings.destinations))
                    .size(18.0)
                    .strong()
                    .color(colors::HEADING),
            );
            ui.add_space(4.0);

            for id in BodyId::ALL {
                if destination_button(ui, id.data(), results.is_complete(id)).clicked() {
                    info!("Selected {} from menu", id.data().name);
                    selected.select(id);
                }
            }

            ui.add_space(24.0);
            let home = egui::Button::new(
                egui::RichText::new(format!("{} {}", icons::HOME, strings.return_home))
                    .size(16.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(colors::HOME)
            .corner_radius(8.0)
            .min_size(egui::vec2(MENU_WIDTH, 40.0));
            if ui.add(home).clicked() {
                info!("Journey finished from menu");
                flow_commands.write(FlowCommand::FinishJourney);
            }
        });
    Ok(())
}

fn destination_button(ui: &mut egui::Ui, data: &BodyData, complete: bool) -> egui::Response {
    let mut label = egui::text::LayoutJob::default();
    label.append(
        "\u{25CF}  ",
        0.0,
        egui::TextFormat::simple(egui::FontId::proportional(16.0), body_color(data)),
    );
    label.append(
        data.name,
        0.0,
        egui::TextFormat::simple(egui::FontId::proportional(15.0), egui::Color32::WHITE),
    );
    if complete {
        label.append(
            icons::SUCCESS,
            8.0,
            egui::TextFormat::simple(egui::FontId::proportional(15.0), colors::DONE),
        );
    }

    ui.add(
        egui::Button::new(label)
            .fill(colors::ENTRY)
            .corner_radius(8.0)
            .min_size(egui::vec2(MENU_WIDTH, 34.0)),
    )
}

pub(crate) fn planet_panel(
    mut contexts: EguiContexts,
    mut selected: ResMut<SelectedBody>,
    mut active_quiz: ResMut<ActiveQuiz>,
    results: Res<QuizResults>,
    config: Res<AppConfig>,
) -> Result {
    let Some(id) = selected.id else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let strings = config.locale.strings();
    let data = id.data();
    let accent = body_color(data);

    egui::Area::new(egui::Id::new("back_to_space"))
        .anchor(egui::Align2::LEFT_TOP, [24.0, 24.0])
        .show(ctx, |ui| {
            let back = egui::Button::new(
                egui::RichText::new(format!("{} {}", icons::BACK, strings.back_to_space))
                    .size(16.0)
                    .color(egui::Color32::WHITE),
            )
            .fill(colors::BACK)
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(80)))
            .corner_radius(20.0);
            if ui.add(back).clicked() {
                selected.clear();
            }
        });

    egui::Area::new(egui::Id::new("planet_panel"))
        .anchor(egui::Align2::RIGHT_CENTER, [-24.0, 0.0])
        .show(ctx, |ui| {
            ui.set_width(PANEL_WIDTH);
            ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                egui::Frame::NONE
                    .fill(colors::INFO_CARD)
                    .stroke(egui::Stroke::new(2.0, accent))
                    .corner_radius(24.0)
                    .inner_margin(egui::Margin::same(20))
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH - 40.0);
                        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                            ui.label(egui::RichText::new(data.name).size(44.0).strong().color(accent));
                            ui.separator();
                            ui.label(egui::RichText::new(data.description).size(17.0).color(colors::TEXT));
                        });
                    });

                if active_quiz.is_open() {
                    return;
                }
                ui.add_space(16.0);

                let video = mission_card(
                    ui,
                    colors::VIDEO_CARD,
                    colors::VIDEO_ACCENT,
                    icons::VIDEO,
                    strings.video_heading,
                    data.video_text,
                    strings.watch_video,
                );
                if video.clicked() {
                    let url = data.video_url();
                    info!("Opening video {url}");
                    ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                }

                ui.add_space(12.0);
                let quiz = mission_card(
                    ui,
                    colors::QUIZ_CARD,
                    colors::QUIZ_ACCENT,
                    icons::QUIZ,
                    strings.quiz_heading,
                    data.quiz_text,
                    quiz_call_to_action(data, strings),
                );
                if quiz.clicked() {
                    if let Some(url) = data.external_quiz_url {
                        info!("Opening external quiz {url}");
                        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                    }
                    active_quiz.open(id, &results);
                }
            });
        });
    Ok(())
}

fn mission_card(
    ui: &mut egui::Ui,
    fill: egui::Color32,
    accent: egui::Color32,
    icon: &str,
    heading: &str,
    text: &str,
    action: &str,
) -> egui::Response {
    let inner = egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(2.0, accent.gamma_multiply(0.4)))
        .corner_radius(16.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(PANEL_WIDTH - 32.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(icon).size(28.0).color(accent));
                ui.label(egui::RichText::new(heading.to_uppercase()).size(13.0).strong().color(accent));
            });
            ui.label(egui::RichText::new(text).size(17.0).color(egui::Color32::WHITE));
            ui.label(
                egui::RichText::new(format!("{} {}", action.to_uppercase(), icons::NEXT))
                    .size(12.0)
                    .strong()
                    .color(accent),
            );
        });
    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

//! Quiz window for the selected body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::AppConfig;
use crate::quiz::{ActiveQuiz, AnswerOutcome, QuizPhase, QuizResults, QuizSignal};
use crate::render::SelectedBody;

use super::icons;

const WINDOW_WIDTH: f32 = 640.0;

mod colors {
    use bevy_egui::egui::Color32;

    pub const WINDOW: Color32 = Color32::from_rgba_premultiplied(30, 27, 75, 242);
    pub const BORDER: Color32 = Color32::from_rgb(250, 204, 21);
    pub const TITLE: Color32 = Color32::from_rgb(250, 204, 21);
    pub const MUTED: Color32 = Color32::from_rgb(165, 180, 252);
    pub const EXTERNAL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 77);
    pub const OPTION: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 13);
    pub const LETTER: Color32 = Color32::from_rgb(129, 140, 248);
    pub const WRONG: Color32 = Color32::from_rgba_premultiplied(127, 29, 29, 160);
    pub const WRONG_TEXT: Color32 = Color32::from_rgb(252, 165, 165);
    pub const SUCCESS: Color32 = Color32::from_rgb(74, 222, 128);
}

/// Letter shown before option `index`: A, B, C...
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Drop the quiz if the cadet moved to another body or back to the overview.
pub(crate) fn sync_quiz_with_selection(selected: Res<SelectedBody>, mut active_quiz: ResMut<ActiveQuiz>) {
    if selected.is_changed() {
        active_quiz.follow_selection(selected.id);
    }
}

pub(crate) fn tick_quiz(
    time: Res<Time>,
    mut active_quiz: ResMut<ActiveQuiz>,
    mut selected: ResMut<SelectedBody>,
) {
    let Some(session) = active_quiz.session_mut() else {
        return;
    };
    match session.tick(time.delta()) {
        Some(QuizSignal::NextQuestion) => debug!("Quiz moved to question {}", session.index() + 1),
        Some(QuizSignal::Completed) => info!("Quiz for {} complete", session.body().data().name),
        Some(QuizSignal::ClosePanel) => {
            active_quiz.close();
            selected.clear();
        }
        None => {}
    }
}

pub(crate) fn quiz_window(
    mut contexts: EguiContexts,
    mut active_quiz: ResMut<ActiveQuiz>,
    mut results: ResMut<QuizResults>,
    config: Res<AppConfig>,
) -> Result {
    let Some(session) = active_quiz.session() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let strings = config.locale.strings();
    let data = session.body().data();

    let mut close = false;
    let mut picked = None;

    egui::Window::new(egui::RichText::new(format!("{}: {}", strings.mission_report, data.name)))
        .id(egui::Id::new("quiz_window"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .frame(
            egui::Frame::NONE
                .fill(colors::WINDOW)
                .stroke(egui::Stroke::new(2.0, colors::BORDER))
                .corner_radius(24.0)
                .inner_margin(egui::Margin::same(28)),
        )
        .show(ctx, |ui| {
            ui.set_width(WINDOW_WIDTH);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new(
                        egui::RichText::new(format!("{} {}", icons::CLOSE, strings.close)).color(colors::MUTED),
                    )
                    .frame(false);
                    if ui.add(button).clicked() {
                        close = true;
                    }
                });
            });
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}: {}", strings.mission_report, data.name))
                        .size(30.0)
                        .strong()
                        .color(colors::TITLE),
                );
            });
            ui.add_space(16.0);

            if let Some(url) = data.external_quiz_url {
                egui::Frame::NONE
                    .fill(colors::EXTERNAL)
                    .corner_radius(12.0)
                    .inner_margin(egui::Margin::same(12))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icons::EXTERNAL).size(32.0).color(colors::MUTED));
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(strings.external_step).size(13.0).color(colors::MUTED));
                                ui.label(egui::RichText::new(strings.external_question).strong());
                                ui.hyperlink_to(
                                    egui::RichText::new(strings.reopen_external).size(12.0).color(colors::TITLE),
                                    url,
                                );
                            });
                        });
                    });
                ui.add_space(16.0);
            }

            match session.phase() {
                QuizPhase::AwaitingAnswer | QuizPhase::ShowingSuccess => {
                    let Some(question) = session.current() else {
                        return;
                    };
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} {}/{}",
                                strings.question,
                                session.index() + 1,
                                session.question_count()
                            ))
                            .size(13.0)
                            .color(colors::MUTED),
                        );
                        ui.label(egui::RichText::new(question.prompt).size(24.0).strong());
                    });
                    ui.add_space(16.0);

                    if session.phase() == QuizPhase::ShowingSuccess {
                        banner(ui, strings.correct_banner);
                        return;
                    }

                    for (idx, option) in question.options.iter().enumerate() {
                        let wrong = session.is_marked_wrong(idx);
                        let (fill, text_color) = if wrong {
                            (colors::WRONG, colors::WRONG_TEXT)
                        } else {
                            (colors::OPTION, egui::Color32::WHITE)
                        };
                        let mut label = egui::text::LayoutJob::default();
                        label.append(
                            &format!("{}.  ", option_letter(idx)),
                            0.0,
                            egui::TextFormat::simple(egui::FontId::proportional(18.0), colors::LETTER),
                        );
                        label.append(
                            option,
                            0.0,
                            egui::TextFormat::simple(egui::FontId::proportional(18.0), text_color),
                        );
                        if wrong {
                            label.append(
                                icons::WRONG,
                                8.0,
                                egui::TextFormat::simple(egui::FontId::proportional(18.0), text_color),
                            );
                        }
                        let button = egui::Button::new(label)
                            .fill(fill)
                            .corner_radius(12.0)
                            .min_size(egui::vec2(ui.available_width(), 48.0));
                        if ui.add_enabled(!wrong, button).clicked() {
                            picked = Some(idx);
                        }
                        ui.add_space(6.0);
                    }
                }
                QuizPhase::Complete => banner(ui, strings.mission_accomplished),
            }
        });

    if close {
        active_quiz.close();
        return Ok(());
    }
    if let Some(option) = picked
        && let Some(session) = active_quiz.session_mut()
    {
        match session.select(option) {
            AnswerOutcome::Correct(result) => {
                info!(
                    "{} question {} answered (first try: {})",
                    data.name,
                    session.index() + 1,
                    result.correct
                );
                results.push(result);
            }
            AnswerOutcome::Wrong => debug!("Wrong option {option} on {}", data.name),
            AnswerOutcome::AlreadyMarked | AnswerOutcome::Ignored => {}
        }
    }
    Ok(())
}

fn banner(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new(format!("{} {text}", icons::TROPHY))
                .size(26.0)
                .strong()
                .color(colors::SUCCESS),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_letters() {
        let letters: String = (0..4).map(option_letter).collect();
        assert_eq!(letters, "ABCD");
    }
}

//! Pre-flight academy slideshow.
//!
//! The cadet steps through the briefing slides. The last slide counts down
//! 3, 2, 1, GO! one second apart and the phase completes a second after GO.

use std::time::Duration;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::audio::SlideSoundCue;
use crate::config::AppConfig;
use crate::flow::{FlowCommand, Session};
use crate::locale::{Slide, SlideSound, with_name};

use super::icons;

/// First number shown by the countdown slide.
pub const COUNTDOWN_START: u8 = 3;

/// Time between countdown steps, and between GO and completion.
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

mod colors {
    use bevy_egui::egui::Color32;

    pub const BACKDROP: Color32 = Color32::from_rgb(0, 0, 0);
    pub const CARD: Color32 = Color32::from_rgba_premultiplied(17, 24, 39, 220);
    pub const BORDER: Color32 = Color32::from_rgb(99, 102, 241);
    pub const PROGRESS: Color32 = Color32::from_rgb(139, 92, 246);
    pub const TITLE: Color32 = Color32::from_rgb(96, 165, 250);
    pub const TEXT: Color32 = Color32::from_rgb(229, 231, 235);
    pub const COUNTDOWN: Color32 = Color32::from_rgb(239, 68, 68);
    pub const DOT: Color32 = Color32::from_rgb(75, 85, 99);
    pub const NEXT: Color32 = Color32::from_rgb(79, 70, 229);
}

/// Emitted by [`AcademyState::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcademySignal {
    /// The countdown moved to a new number (0 means GO).
    Countdown(u8),
    /// A second after GO; the academy is over.
    Completed,
}

/// Slideshow position and countdown.
#[derive(Resource, Debug, Clone)]
pub struct AcademyState {
    slides: &'static [Slide],
    index: usize,
    countdown: u8,
    timer: Timer,
    completed: bool,
    cue: Option<Option<SlideSound>>,
}

impl AcademyState {
    pub fn new(slides: &'static [Slide]) -> Self {
        let mut state = Self {
            slides,
            index: 0,
            countdown: COUNTDOWN_START,
            timer: Timer::new(COUNTDOWN_STEP, TimerMode::Repeating),
            completed: false,
            cue: None,
        };
        state.show(0);
        state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self) -> Option<&'static Slide> {
        self.slides.get(self.index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// The slide before the countdown, whose Next button reads "Launch!".
    pub fn is_penultimate(&self) -> bool {
        self.index + 2 == self.slides.len()
    }

    /// Fraction of the slideshow reached, counting the current slide.
    pub fn progress(&self) -> f32 {
        if self.slides.is_empty() {
            return 1.0;
        }
        (self.index + 1) as f32 / self.slides.len() as f32
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn is_counting_down(&self) -> bool {
        self.slide().is_some_and(|slide| slide.countdown)
    }

    /// Navigation is locked once the countdown starts.
    pub fn can_navigate(&self) -> bool {
        !self.is_counting_down()
    }

    pub fn next(&mut self) -> bool {
        if !self.can_navigate() || self.index + 1 >= self.slides.len() {
            return false;
        }
        self.show(self.index + 1);
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_navigate() || self.index == 0 {
            return false;
        }
        self.show(self.index - 1);
        true
    }

    /// Sound change pending since the last call, if the slide changed.
    pub fn take_cue(&mut self) -> Option<Option<SlideSound>> {
        self.cue.take()
    }

    /// Advance the countdown. Does nothing outside the countdown slide.
    pub fn tick(&mut self, delta: Duration) -> Option<AcademySignal> {
        if self.completed || !self.is_counting_down() {
            return None;
        }
        self.timer.tick(delta);
        if !self.timer.just_finished() {
            return None;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            Some(AcademySignal::Countdown(self.countdown))
        } else {
            self.completed = true;
            Some(AcademySignal::Completed)
        }
    }

    fn show(&mut self, index: usize) {
        self.index = index;
        self.countdown = COUNTDOWN_START;
        self.timer.reset();
        self.cue = Some(self.slide().and_then(|slide| slide.sound));
    }
}

pub(crate) fn start_academy(mut commands: Commands, config: Res<AppConfig>) {
    let state = AcademyState::new(config.locale.slides());
    info!("Academy started with {} slides", state.slide_count());
    commands.insert_resource(state);
}

pub(crate) fn tick_academy(
    time: Res<Time>,
    mut academy: ResMut<AcademyState>,
    mut flow_commands: MessageWriter<FlowCommand>,
    mut cues: MessageWriter<SlideSoundCue>,
) {
    if let Some(cue) = academy.take_cue() {
        cues.write(SlideSoundCue(cue));
    }
    match academy.tick(time.delta()) {
        Some(AcademySignal::Countdown(n)) => debug!("Countdown {n}"),
        Some(AcademySignal::Completed) => {
            info!("Academy complete, launching");
            flow_commands.write(FlowCommand::AcademyCompleted);
        }
        None => {}
    }
}

pub(crate) fn academy_screen(
    mut contexts: EguiContexts,
    mut academy: ResMut<AcademyState>,
    session: Res<Session>,
    config: Res<AppConfig>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let strings = config.locale.strings();
    let pilot = session.pilot_name().unwrap_or_default();
    let Some(slide) = academy.slide() else {
        return Ok(());
    };

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(colors::BACKDROP))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space((ui.available_height() * 0.12).max(16.0));
                egui::Frame::NONE
                    .fill(colors::CARD)
                    .stroke(egui::Stroke::new(2.0, colors::BORDER))
                    .corner_radius(24.0)
                    .inner_margin(egui::Margin::symmetric(40, 32))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width().min(760.0));
                        ui.add(
                            egui::ProgressBar::new(academy.progress())
                                .desired_height(8.0)
                                .fill(colors::PROGRESS),
                        );
                        ui.add_space(24.0);

                        ui.vertical_centered(|ui| {
                            if slide.countdown {
                                let text = match academy.countdown() {
                                    0 => strings.go.to_owned(),
                                    n => n.to_string(),
                                };
                                ui.label(
                                    egui::RichText::new(text)
                                        .size(120.0)
                                        .strong()
                                        .color(colors::COUNTDOWN),
                                );
                            } else {
                                ui.label(
                                    egui::RichText::new(icons::slide_icon(slide.icon))
                                        .size(96.0)
                                        .color(colors::TEXT),
                                );
                            }
                            ui.add_space(12.0);
                            ui.label(
                                egui::RichText::new(slide.title)
                                    .size(40.0)
                                    .strong()
                                    .color(colors::TITLE),
                            );
                            ui.add_space(16.0);
                            ui.label(
                                egui::RichText::new(with_name(slide.body, pilot))
                                    .size(22.0)
                                    .color(colors::TEXT),
                            );
                        });

                        if academy.can_navigate() {
                            ui.add_space(32.0);
                            ui.separator();
                            ui.add_space(12.0);
                            navigation_row(ui, &mut academy, strings);
                        }
                    });
            });
        });
    Ok(())
}

fn navigation_row(ui: &mut egui::Ui, academy: &mut AcademyState, strings: &crate::locale::Strings) {
    ui.horizontal(|ui| {
        if !academy.is_first() {
            let previous = egui::Button::new(
                egui::RichText::new(format!("{} {}", icons::PREVIOUS, strings.previous)).size(18.0),
            );
            if ui.add(previous).clicked() {
                academy.previous();
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if academy.is_penultimate() {
                strings.launch
            } else {
                strings.next
            };
            let next = egui::Button::new(
                egui::RichText::new(format!("{label} {}", icons::NEXT))
                    .size(18.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(colors::NEXT)
            .corner_radius(12.0);
            if ui.add(next).clicked() {
                academy.next();
            }

            ui.add_space(24.0);
            for idx in (0..academy.slide_count()).rev() {
                let (radius, color) = if idx == academy.index() {
                    (7.0, egui::Color32::WHITE)
                } else {
                    (5.0, colors::DOT)
                };
                let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), radius, color);
            }
        });
    });
}

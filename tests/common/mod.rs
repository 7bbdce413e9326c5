//! Common test utilities for integration tests.

use bevy::prelude::*;
use std::time::Duration;

use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use cadet_mission::config::AppConfig;
use cadet_mission::flow::{AppPhase, FlowPlugin};
use cadet_mission::portrait::{AvatarProfile, Gender, HairColor, HairStyle, Height};
use cadet_mission::storage::ProfileStore;
use cadet_mission::ui::UiPlugin;
use tempfile::TempDir;

/// Headless app running the phase flow, storing profiles under `dir`.
pub fn flow_app(dir: &TempDir) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(ProfileStore::in_dir(dir.path()))
        .add_plugins(FlowPlugin);
    app.update();
    app
}

/// Simulated time per frame in [`mission_app`].
pub const FRAME: Duration = Duration::from_millis(100);

/// Headless app with the flow and the screen logic. Egui passes never run
/// here, so only the state-driven systems are exercised. Every update
/// advances time by [`FRAME`].
pub fn mission_app(dir: &TempDir) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(AppConfig::default())
        .insert_resource(ProfileStore::in_dir(dir.path()))
        .add_plugins((FlowPlugin, UiPlugin));
    app.update();
    app
}

/// Run frames until at least `duration` of game time has passed.
pub fn run_for(app: &mut App, duration: Duration) {
    let frames = duration.as_millis().div_ceil(FRAME.as_millis()) + 2;
    for _ in 0..frames {
        app.update();
    }
}

/// Current phase of `app`.
pub fn phase(app: &App) -> AppPhase {
    *app.world().resource::<State<AppPhase>>().get()
}

/// Run enough frames for a written command to be applied and the state
/// transition to happen.
pub fn settle(app: &mut App) {
    app.update();
    app.update();
}

pub fn cadet(name: &str) -> AvatarProfile {
    AvatarProfile {
        name: name.to_string(),
        gender: Gender::Boy,
        height: Height::Tall,
        hair_color: HairColor::Black,
        hair_style: HairStyle::Short,
        portrait: None,
        outro: None,
    }
}

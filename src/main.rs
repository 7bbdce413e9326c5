//! Cadet Mission - Solar System
//!
//! A desktop application where young cadets create an astronaut, train in
//! the academy and explore the planets answering quiz questions.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use cadet_mission::audio::AudioPlugin;
use cadet_mission::camera::CameraPlugin;
use cadet_mission::config::AppConfig;
use cadet_mission::flow::FlowPlugin;
use cadet_mission::input::InputPlugin;
use cadet_mission::portrait::PortraitPlugin;
use cadet_mission::render::RenderPlugin;
use cadet_mission::ui::UiPlugin;

fn main() {
    let config = AppConfig::load_or_default(&AppConfig::default_path());
    let title = config.locale.strings().app_title;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: title.to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(config)
        .add_plugins((
            FlowPlugin,
            PortraitPlugin,
            CameraPlugin,
            RenderPlugin,
            InputPlugin,
            AudioPlugin,
            UiPlugin,
        ))
        .run();
}

//! Phase-scoped sound.
//!
//! The ambient loop belongs to the solar-system scene and the slide effects
//! belong to the academy. Each is an entity spawned by its phase and
//! despawned when the phase ends, so nothing keeps playing across phases.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use crate::config::{AppConfig, AudioConfig};
use crate::flow::AppPhase;
use crate::locale::SlideSound;
use crate::render::{SceneEntity, SelectedBody};

/// Marks the looping ambient track.
#[derive(Component, Debug)]
pub struct AmbientLoop;

/// Marks a one-shot academy effect.
#[derive(Component, Debug)]
pub struct SlideEffect;

/// Sent whenever a new slide is shown. Any effect still playing stops; the
/// slide's own effect, if it has one, starts.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSoundCue(pub Option<SlideSound>);

/// Asset path for a slide effect.
pub fn effect_path(audio: &AudioConfig, sound: SlideSound) -> &str {
    match sound {
        SlideSound::Engine => &audio.engine_path,
        SlideSound::Countdown => &audio.countdown_path,
    }
}

/// Whether the ambient loop should be audible for the current selection.
pub fn ambient_should_play(selected: &SelectedBody) -> bool {
    !selected.any()
}

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SlideSoundCue>()
            .add_systems(OnEnter(AppPhase::SolarSystem), start_ambient)
            .add_systems(
                Update,
                pause_ambient_on_selection.run_if(in_state(AppPhase::SolarSystem)),
            )
            .add_systems(
                Update,
                play_slide_sounds.run_if(in_state(AppPhase::Academy)),
            )
            .add_systems(OnExit(AppPhase::Academy), stop_slide_sounds);
    }
}

fn start_ambient(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<AppConfig>) {
    let audio = &config.audio;
    if !audio.enabled {
        return;
    }
    commands.spawn((
        AudioPlayer::new(asset_server.load(audio.ambient_path.clone())),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(audio.ambient_volume)),
        AmbientLoop,
        SceneEntity,
    ));
    info!("Ambient loop started ({})", audio.ambient_path);
}

fn pause_ambient_on_selection(
    selected: Res<SelectedBody>,
    sinks: Query<&AudioSink, With<AmbientLoop>>,
) {
    if !selected.is_changed() {
        return;
    }
    let play = ambient_should_play(&selected);
    for sink in &sinks {
        if play && sink.is_paused() {
            sink.play();
        } else if !play && !sink.is_paused() {
            sink.pause();
        }
    }
}

fn play_slide_sounds(
    mut commands: Commands,
    mut cues: MessageReader<SlideSoundCue>,
    playing: Query<Entity, With<SlideEffect>>,
    asset_server: Res<AssetServer>,
    config: Res<AppConfig>,
) {
    let Some(SlideSoundCue(cue)) = cues.read().last().copied() else {
        return;
    };
    for entity in &playing {
        commands.entity(entity).despawn();
    }
    if let Some(sound) = cue.filter(|_| config.audio.enabled) {
        let path = effect_path(&config.audio, sound).to_owned();
        debug!("Playing {sound:?} effect from {path}");
        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(config.audio.effects_volume)),
            SlideEffect,
        ));
    }
}

fn stop_slide_sounds(mut commands: Commands, effects: Query<Entity, With<SlideEffect>>) {
    for entity in &effects {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BodyId;

    #[test]
    fn test_effect_paths_follow_config() {
        let audio = AudioConfig::default();
        assert_eq!(effect_path(&audio, SlideSound::Engine), audio.engine_path);
        assert_eq!(effect_path(&audio, SlideSound::Countdown), audio.countdown_path);
    }

    #[test]
    fn test_ambient_pauses_while_selected() {
        let mut selected = SelectedBody::default();
        assert!(ambient_should_play(&selected));
        selected.select(BodyId::Mars);
        assert!(!ambient_should_play(&selected));
        selected.clear();
        assert!(ambient_should_play(&selected));
    }
}

//! Top-level phase flow.
//!
//! ```text
//! AvatarCreation --AvatarCompleted--> Academy --AcademyCompleted--> SolarSystem --FinishJourney--> Outro
//!        \------(skip_academy)-------------------------------------^
//! any phase --Restart--> AvatarCreation (profile, results, selection cleared)
//! ```
//!
//! Screens never switch phases themselves; they write a [`FlowCommand`] and
//! the flow system decides whether it applies to the current phase.

use bevy::prelude::*;

use crate::config::AppConfig;
use crate::portrait::{AvatarProfile, PortraitRequests, Portraits};
use crate::quiz::{ActiveQuiz, QuizResults};
use crate::render::SelectedBody;
use crate::storage::ProfileStore;
use crate::types::SceneSystemSet;

/// Screen currently mounted.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppPhase {
    #[default]
    AvatarCreation,
    Academy,
    SolarSystem,
    Outro,
}

/// Requests to move between phases.
#[derive(Message, Debug, Clone)]
pub enum FlowCommand {
    AvatarCompleted {
        profile: AvatarProfile,
        skip_academy: bool,
    },
    AcademyCompleted,
    FinishJourney,
    Restart,
}

/// The cadet playing this session.
#[derive(Resource, Debug, Default, Clone)]
pub struct Session {
    pub profile: Option<AvatarProfile>,
}

impl Session {
    pub fn pilot_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.name.as_str())
    }
}

pub fn phase_after_avatar(skip_academy: bool) -> AppPhase {
    if skip_academy {
        AppPhase::SolarSystem
    } else {
        AppPhase::Academy
    }
}

/// Phase `command` leads to from `phase`, or `None` if it does not apply there.
pub fn next_phase(phase: AppPhase, command: &FlowCommand) -> Option<AppPhase> {
    match (phase, command) {
        (AppPhase::AvatarCreation, FlowCommand::AvatarCompleted { skip_academy, .. }) => {
            Some(phase_after_avatar(*skip_academy))
        }
        (AppPhase::Academy, FlowCommand::AcademyCompleted) => Some(AppPhase::SolarSystem),
        (AppPhase::SolarSystem, FlowCommand::FinishJourney) => Some(AppPhase::Outro),
        (_, FlowCommand::Restart) => Some(AppPhase::AvatarCreation),
        _ => None,
    }
}

/// Plugin owning the phase state machine and the session.
pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ProfileStore>() {
            let store = app
                .world()
                .get_resource::<AppConfig>()
                .map(|config| ProfileStore::new(config.storage_dir.as_deref()))
                .unwrap_or_else(|| ProfileStore::new(None));
            app.insert_resource(store);
        }

        let profile = saved_profile(app.world().resource::<ProfileStore>());

        app.init_state::<AppPhase>()
            .add_message::<FlowCommand>()
            .insert_resource(Session { profile })
            .init_resource::<QuizResults>()
            .init_resource::<ActiveQuiz>()
            .init_resource::<SelectedBody>()
            .init_resource::<Portraits>()
            .init_resource::<PortraitRequests>()
            .configure_sets(
                Update,
                (SceneSystemSet::Input, SceneSystemSet::Animate)
                    .chain()
                    .run_if(in_state(AppPhase::SolarSystem)),
            )
            .add_systems(Update, apply_flow_commands);
    }
}

/// Read the saved profile while the plugin is built, so the systems entering
/// the initial phase already see it.
fn saved_profile(store: &ProfileStore) -> Option<AvatarProfile> {
    match store.load() {
        Ok(Some(profile)) => {
            info!("Loaded saved profile for {}", profile.name);
            Some(profile)
        }
        Ok(None) => None,
        Err(err) => {
            warn!("Could not load saved profile: {err}");
            None
        }
    }
}

fn apply_flow_commands(
    mut flow_commands: MessageReader<FlowCommand>,
    state: Res<State<AppPhase>>,
    mut next_state: ResMut<NextState<AppPhase>>,
    store: Res<ProfileStore>,
    mut session: ResMut<Session>,
    mut results: ResMut<QuizResults>,
    mut active_quiz: ResMut<ActiveQuiz>,
    mut selected: ResMut<SelectedBody>,
    mut portraits: ResMut<Portraits>,
    mut requests: ResMut<PortraitRequests>,
) {
    let mut phase = *state.get();

    for command in flow_commands.read() {
        let Some(next) = next_phase(phase, command) else {
            debug!("Ignoring {command:?} in {phase:?}");
            continue;
        };

        match command {
            FlowCommand::AvatarCompleted { profile, .. } => {
                if let Err(err) = store.save(profile) {
                    warn!("Could not save profile, continuing without it: {err}");
                }
                session.profile = Some(profile.clone());
            }
            FlowCommand::Restart => {
                if let Err(err) = store.clear() {
                    warn!("Could not remove saved profile: {err}");
                }
                session.profile = None;
                results.clear();
                active_quiz.close();
                selected.clear();
                portraits.reset();
                requests.cancel_all();
            }
            FlowCommand::AcademyCompleted | FlowCommand::FinishJourney => {}
        }

        info!("Phase {phase:?} -> {next:?}");
        next_state.set(next);
        phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::cadet;

    #[test]
    fn test_avatar_completion_branches_on_skip() {
        let done = |skip_academy| FlowCommand::AvatarCompleted {
            profile: cadet("Ona"),
            skip_academy,
        };
        assert_eq!(next_phase(AppPhase::AvatarCreation, &done(false)), Some(AppPhase::Academy));
        assert_eq!(next_phase(AppPhase::AvatarCreation, &done(true)), Some(AppPhase::SolarSystem));
        assert_eq!(next_phase(AppPhase::SolarSystem, &done(true)), None);
    }

    #[test]
    fn test_commands_only_apply_in_their_phase() {
        assert_eq!(next_phase(AppPhase::Academy, &FlowCommand::AcademyCompleted), Some(AppPhase::SolarSystem));
        assert_eq!(next_phase(AppPhase::SolarSystem, &FlowCommand::AcademyCompleted), None);
        assert_eq!(next_phase(AppPhase::SolarSystem, &FlowCommand::FinishJourney), Some(AppPhase::Outro));
        assert_eq!(next_phase(AppPhase::Academy, &FlowCommand::FinishJourney), None);
    }

    #[test]
    fn test_restart_from_anywhere() {
        for phase in [
            AppPhase::AvatarCreation,
            AppPhase::Academy,
            AppPhase::SolarSystem,
            AppPhase::Outro,
        ] {
            assert_eq!(next_phase(phase, &FlowCommand::Restart), Some(AppPhase::AvatarCreation));
        }
    }
}

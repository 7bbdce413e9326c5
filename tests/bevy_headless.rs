//! Headless Bevy integration tests.
//!
//! These tests drive the phase flow through its messages without a window or GPU.

mod common;

use bevy::prelude::*;
use cadet_mission::content::BodyId;
use cadet_mission::flow::{AppPhase, FlowCommand, Session};
use cadet_mission::quiz::{
    ActiveQuiz, AnswerOutcome, COMPLETE_PAUSE, QuizPhase, QuizResult, QuizResults, SUCCESS_PAUSE,
};
use cadet_mission::render::SelectedBody;
use cadet_mission::storage::ProfileStore;
use cadet_mission::ui::AvatarForm;
use common::{cadet, flow_app, mission_app, phase, run_for, settle};

fn complete_avatar(app: &mut App, skip_academy: bool) {
    app.world_mut().write_message(FlowCommand::AvatarCompleted {
        profile: cadet("Biel"),
        skip_academy,
    });
    settle(app);
}

#[test]
fn test_starts_in_avatar_creation() {
    let dir = tempfile::tempdir().unwrap();
    let app = flow_app(&dir);
    assert_eq!(phase(&app), AppPhase::AvatarCreation);
    assert!(app.world().resource::<Session>().profile.is_none());
}

#[test]
fn test_avatar_then_academy_then_solar_system() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = flow_app(&dir);

    complete_avatar(&mut app, false);
    assert_eq!(phase(&app), AppPhase::Academy);
    assert_eq!(app.world().resource::<Session>().pilot_name(), Some("Biel"));

    app.world_mut().write_message(FlowCommand::AcademyCompleted);
    settle(&mut app);
    assert_eq!(phase(&app), AppPhase::SolarSystem);

    app.world_mut().write_message(FlowCommand::FinishJourney);
    settle(&mut app);
    assert_eq!(phase(&app), AppPhase::Outro);
}

#[test]
fn test_skip_academy_goes_straight_to_space() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = flow_app(&dir);
    complete_avatar(&mut app, true);
    assert_eq!(phase(&app), AppPhase::SolarSystem);
}

#[test]
fn test_completed_avatar_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = flow_app(&dir);
    complete_avatar(&mut app, true);

    let saved = ProfileStore::in_dir(dir.path()).load().unwrap();
    assert_eq!(saved.map(|p| p.name), Some("Biel".to_string()));
}

#[test]
fn test_saved_profile_loaded_on_startup() {
    let dir = tempfile::tempdir().unwrap();
    ProfileStore::in_dir(dir.path()).save(&cadet("Martina")).unwrap();

    let app = flow_app(&dir);
    assert_eq!(app.world().resource::<Session>().pilot_name(), Some("Martina"));
    assert_eq!(phase(&app), AppPhase::AvatarCreation);
}

#[test]
fn test_saved_profile_prefills_avatar_form() {
    let dir = tempfile::tempdir().unwrap();
    ProfileStore::in_dir(dir.path()).save(&cadet("Martina")).unwrap();

    let app = mission_app(&dir);
    assert_eq!(phase(&app), AppPhase::AvatarCreation);
    let form = app.world().resource::<AvatarForm>();
    assert_eq!(form.draft.name, "Martina");
    assert!(!form.name_missing);
}

#[test]
fn test_commands_for_other_phases_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = flow_app(&dir);

    app.world_mut().write_message(FlowCommand::FinishJourney);
    settle(&mut app);
    assert_eq!(phase(&app), AppPhase::AvatarCreation);

    complete_avatar(&mut app, false);
    app.world_mut().write_message(FlowCommand::FinishJourney);
    settle(&mut app);
    assert_eq!(phase(&app), AppPhase::Academy);
}

#[test]
fn test_restart_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = flow_app(&dir);
    complete_avatar(&mut app, true);

    {
        let world = app.world_mut();
        world.resource_mut::<QuizResults>().push(QuizResult {
            body: BodyId::Mars,
            correct: true,
        });
        world.resource_mut::<SelectedBody>().select(BodyId::Mars);
        world.resource_mut::<ActiveQuiz>().open(BodyId::Mars, &QuizResults::default());
    }

    app.world_mut().write_message(FlowCommand::FinishJourney);
    settle(&mut app);
    assert_eq!(phase(&app), AppPhase::Outro);

    app.world_mut().write_message(FlowCommand::Restart);
    settle(&mut app);

    assert_eq!(phase(&app), AppPhase::AvatarCreation);
    let world = app.world();
    assert!(world.resource::<Session>().profile.is_none());
    assert!(world.resource::<QuizResults>().is_empty());
    assert!(!world.resource::<SelectedBody>().any());
    assert!(!world.resource::<ActiveQuiz>().is_open());
    assert_eq!(ProfileStore::in_dir(dir.path()).load().unwrap(), None);
}

fn open_quiz(app: &mut App, body: BodyId) {
    let world = app.world_mut();
    world.resource_mut::<SelectedBody>().select(body);
    let results = world.resource::<QuizResults>().clone();
    world.resource_mut::<ActiveQuiz>().open(body, &results);
}

/// Pick an option on the open quiz the way the quiz window does.
fn pick(app: &mut App, correct: bool) -> Option<AnswerOutcome> {
    let world = app.world_mut();
    let outcome = world.resource_mut::<ActiveQuiz>().session_mut().and_then(|session| {
        let question = session.current()?;
        let option = if correct {
            question.correct
        } else {
            (question.correct + 1) % question.options.len()
        };
        Some(session.select(option))
    });
    if let Some(AnswerOutcome::Correct(result)) = outcome {
        world.resource_mut::<QuizResults>().push(result);
    }
    outcome
}

fn quiz_phase(app: &App) -> Option<QuizPhase> {
    app.world().resource::<ActiveQuiz>().session().map(|s| s.phase())
}

#[test]
fn test_finished_quiz_closes_and_returns_to_overview() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = mission_app(&dir);
    complete_avatar(&mut app, true);

    let body = BodyId::Mars;
    let count = body.data().quiz.len();
    open_quiz(&mut app, body);

    for _ in 0..count {
        assert!(matches!(pick(&mut app, true), Some(AnswerOutcome::Correct(_))));
        run_for(&mut app, SUCCESS_PAUSE);
    }
    assert_eq!(quiz_phase(&app), Some(QuizPhase::Complete));
    assert_eq!(app.world().resource::<SelectedBody>().id, Some(body));

    run_for(&mut app, COMPLETE_PAUSE);
    let world = app.world();
    assert!(!world.resource::<ActiveQuiz>().is_open());
    assert_eq!(world.resource::<SelectedBody>().id, None);
    assert_eq!(world.resource::<QuizResults>().answered_for(body), count);
    assert!(world.resource::<QuizResults>().is_complete(body));
}

#[test]
fn test_switching_body_mid_quiz_drops_it() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = mission_app(&dir);
    complete_avatar(&mut app, true);

    open_quiz(&mut app, BodyId::Mars);
    assert_eq!(pick(&mut app, false), Some(AnswerOutcome::Wrong));
    app.update();
    assert!(app.world().resource::<ActiveQuiz>().is_open());

    app.world_mut().resource_mut::<SelectedBody>().select(BodyId::Venus);
    app.update();

    let world = app.world();
    assert!(!world.resource::<ActiveQuiz>().is_open());
    assert!(world.resource::<QuizResults>().is_empty());
    assert_eq!(world.resource::<SelectedBody>().id, Some(BodyId::Venus));
}

#[test]
fn test_quiz_pauses_only_run_in_solar_system() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = mission_app(&dir);
    assert_eq!(phase(&app), AppPhase::AvatarCreation);

    open_quiz(&mut app, BodyId::Mars);
    assert!(matches!(pick(&mut app, true), Some(AnswerOutcome::Correct(_))));
    run_for(&mut app, SUCCESS_PAUSE * 2);

    assert_eq!(quiz_phase(&app), Some(QuizPhase::ShowingSuccess));
    assert_eq!(app.world().resource::<ActiveQuiz>().session().map(|s| s.index()), Some(0));
}

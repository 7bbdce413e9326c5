//! Quiz progression scenarios across sessions and bodies.

use std::time::Duration;

use cadet_mission::content::BodyId;
use cadet_mission::quiz::{
    ActiveQuiz, AnswerOutcome, COMPLETE_PAUSE, QuizPhase, QuizResults, QuizSignal, SUCCESS_PAUSE,
};

fn past(pause: Duration) -> Duration {
    pause + Duration::from_millis(10)
}

/// Answer the current question, optionally picking a wrong option first.
fn answer(quiz: &mut ActiveQuiz, results: &mut QuizResults, wrong_first: bool) {
    let session = quiz.session_mut().expect("quiz open");
    let question = session.current().expect("question on screen");
    if wrong_first {
        let wrong = (question.correct + 1) % question.options.len();
        assert_eq!(session.select(wrong), AnswerOutcome::Wrong);
    }
    match session.select(question.correct) {
        AnswerOutcome::Correct(result) => results.push(result),
        other => panic!("expected a correct answer, got {other:?}"),
    }
}

#[test]
fn test_full_quiz_records_one_result_per_question() {
    let body = BodyId::Earth;
    let count = body.data().quiz.len();
    let mut quiz = ActiveQuiz::default();
    let mut results = QuizResults::default();
    quiz.open(body, &results);

    for i in 0..count {
        answer(&mut quiz, &mut results, i == 0);
        let session = quiz.session_mut().unwrap();
        let signal = session.tick(past(SUCCESS_PAUSE));
        if i + 1 < count {
            assert_eq!(signal, Some(QuizSignal::NextQuestion));
        } else {
            assert_eq!(signal, Some(QuizSignal::Completed));
        }
    }

    let session = quiz.session_mut().unwrap();
    assert_eq!(session.phase(), QuizPhase::Complete);
    assert_eq!(session.tick(past(COMPLETE_PAUSE)), Some(QuizSignal::ClosePanel));

    assert_eq!(results.answered_for(body), count);
    assert!(results.is_complete(body));
    let score = results.score();
    assert_eq!(score.total, count);
    assert_eq!(score.correct, count - 1);
}

#[test]
fn test_abandoned_quiz_resumes_where_it_stopped() {
    let body = BodyId::Saturn;
    let mut quiz = ActiveQuiz::default();
    let mut results = QuizResults::default();

    quiz.open(body, &results);
    answer(&mut quiz, &mut results, false);
    quiz.follow_selection(None);
    assert!(!quiz.is_open());

    quiz.open(body, &results);
    let session = quiz.session().unwrap();
    if body.data().quiz.len() > 1 {
        assert_eq!(session.index(), 1);
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
    } else {
        assert_eq!(session.phase(), QuizPhase::Complete);
    }
    assert_eq!(results.answered_for(body), 1);
}

#[test]
fn test_results_from_several_bodies_add_up() {
    let mut quiz = ActiveQuiz::default();
    let mut results = QuizResults::default();

    for body in [BodyId::Mercury, BodyId::Neptune] {
        quiz.open(body, &results);
        answer(&mut quiz, &mut results, true);
        quiz.close();
    }

    let score = results.score();
    assert_eq!(score.total, 2);
    assert_eq!(score.correct, 0);
    assert_eq!(score.display_total(), 2);
}

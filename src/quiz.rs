//! Quiz progression for a single body.
//!
//! A session walks through the body's questions in order. Every question can
//! be retried until it is answered correctly; it is scored as correct only
//! when no wrong option was picked before the right one.
//!
//! ```text
//! AwaitingAnswer --correct--> ShowingSuccess --1.5s--> AwaitingAnswer (next)
//!                                            \--1.5s--> Complete --0.8s--> close
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use bevy::prelude::*;

use crate::content::{BodyId, QuizQuestion};

/// How long the "correct!" banner stays up before moving on.
pub const SUCCESS_PAUSE: Duration = Duration::from_millis(1500);

/// Delay between the last success pause and closing the panel.
pub const COMPLETE_PAUSE: Duration = Duration::from_millis(800);

/// Outcome of one completed question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizResult {
    pub body: BodyId,
    /// True only if the question was answered right on the first attempt.
    pub correct: bool,
}

/// All results recorded during the journey, in the order they were earned.
#[derive(Resource, Default, Debug, Clone)]
pub struct QuizResults(pub Vec<QuizResult>);

/// Score summary shown on the ending screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Denominator for display; never zero so "0 / 1" shows for an empty journey.
    pub fn display_total(&self) -> usize {
        self.total.max(1)
    }
}

impl QuizResults {
    pub fn push(&mut self, result: QuizResult) {
        self.0.push(result);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of questions already answered for `body`.
    pub fn answered_for(&self, body: BodyId) -> usize {
        self.0.iter().filter(|r| r.body == body).count()
    }

    /// True once every question of `body` has a recorded result.
    pub fn is_complete(&self, body: BodyId) -> bool {
        self.answered_for(body) >= body.data().quiz.len()
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self.0.iter().filter(|r| r.correct).count(),
            total: self.0.len(),
        }
    }
}

/// Phase of a quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the cadet to pick an option.
    AwaitingAnswer,
    /// Brief celebration after a correct answer.
    ShowingSuccess,
    /// Every question is done; the panel closes shortly.
    Complete,
}

/// What happened when an option was picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Right answer; the result to record for this question.
    Correct(QuizResult),
    /// Wrong answer, option is now disabled.
    Wrong,
    /// Option was already marked wrong; nothing changed.
    AlreadyMarked,
    /// Not accepting input (pause, complete, or index out of range).
    Ignored,
}

/// Signals emitted by [`QuizSession::tick`] when a pause elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSignal {
    /// Moved on to the next question.
    NextQuestion,
    /// Last success pause elapsed; session is now `Complete`.
    Completed,
    /// Completion pause elapsed; close the panel and return to overview.
    ClosePanel,
}

/// In-progress quiz for one body.
#[derive(Debug, Clone)]
pub struct QuizSession {
    body: BodyId,
    questions: &'static [QuizQuestion],
    index: usize,
    wrong: BTreeSet<usize>,
    phase: QuizPhase,
    pause: Option<Timer>,
}

impl QuizSession {
    /// Start a session at the first question.
    pub fn new(body: BodyId, questions: &'static [QuizQuestion]) -> Self {
        Self::resume(body, questions, 0)
    }

    /// Start a session at question `answered`, skipping questions that already
    /// have a recorded result. If nothing is left the session starts `Complete`.
    pub fn resume(body: BodyId, questions: &'static [QuizQuestion], answered: usize) -> Self {
        let index = answered.min(questions.len());
        let (phase, pause) = if index >= questions.len() {
            (QuizPhase::Complete, Some(Timer::new(COMPLETE_PAUSE, TimerMode::Once)))
        } else {
            (QuizPhase::AwaitingAnswer, None)
        };
        Self {
            body,
            questions,
            index,
            wrong: BTreeSet::new(),
            phase,
            pause,
        }
    }

    /// Session for `body` using its authored questions.
    pub fn for_body(body: BodyId, answered: usize) -> Self {
        Self::resume(body, body.data().quiz, answered)
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Zero-based index of the question on screen.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Question on screen, `None` once complete.
    pub fn current(&self) -> Option<&'static QuizQuestion> {
        if self.phase == QuizPhase::Complete {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn is_marked_wrong(&self, option: usize) -> bool {
        self.wrong.contains(&option)
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong.len()
    }

    /// Pick `option` for the current question.
    pub fn select(&mut self, option: usize) -> AnswerOutcome {
        if self.phase != QuizPhase::AwaitingAnswer {
            return AnswerOutcome::Ignored;
        }
        let Some(question) = self.questions.get(self.index) else {
            return AnswerOutcome::Ignored;
        };
        if option >= question.options.len() {
            return AnswerOutcome::Ignored;
        }

        if option == question.correct {
            let result = QuizResult {
                body: self.body,
                correct: self.wrong.is_empty(),
            };
            self.phase = QuizPhase::ShowingSuccess;
            self.pause = Some(Timer::new(SUCCESS_PAUSE, TimerMode::Once));
            AnswerOutcome::Correct(result)
        } else if self.wrong.insert(option) {
            AnswerOutcome::Wrong
        } else {
            AnswerOutcome::AlreadyMarked
        }
    }

    /// Advance the pause timer. Returns a signal when a pause elapses.
    pub fn tick(&mut self, delta: Duration) -> Option<QuizSignal> {
        let timer = self.pause.as_mut()?;
        timer.tick(delta);
        if !timer.just_finished() {
            return None;
        }

        match self.phase {
            QuizPhase::AwaitingAnswer => {
                self.pause = None;
                None
            }
            QuizPhase::ShowingSuccess => {
                if self.index + 1 < self.questions.len() {
                    self.index += 1;
                    self.wrong.clear();
                    self.phase = QuizPhase::AwaitingAnswer;
                    self.pause = None;
                    Some(QuizSignal::NextQuestion)
                } else {
                    self.phase = QuizPhase::Complete;
                    self.pause = Some(Timer::new(COMPLETE_PAUSE, TimerMode::Once));
                    Some(QuizSignal::Completed)
                }
            }
            QuizPhase::Complete => {
                self.pause = None;
                Some(QuizSignal::ClosePanel)
            }
        }
    }
}

/// The quiz window currently open, if any. Dropping the session drops its timer.
#[derive(Resource, Debug, Default)]
pub struct ActiveQuiz(pub Option<QuizSession>);

impl ActiveQuiz {
    /// Open (or reopen) the quiz for `body`, resuming after recorded results.
    pub fn open(&mut self, body: BodyId, results: &QuizResults) {
        self.0 = Some(QuizSession::for_body(body, results.answered_for(body)));
    }

    pub fn close(&mut self) {
        self.0 = None;
    }

    pub fn is_open(&self) -> bool {
        self.0.is_some()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.0.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.0.as_mut()
    }

    /// Close the window if it belongs to a body other than `selected`.
    pub fn follow_selection(&mut self, selected: Option<BodyId>) {
        if self.0.as_ref().is_some_and(|s| Some(s.body()) != selected) {
            self.0 = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{ONE_QUESTION, TWO_QUESTIONS};

    fn run_pause(session: &mut QuizSession, pause: Duration) -> Option<QuizSignal> {
        session.tick(pause + Duration::from_millis(1))
    }

    #[test]
    fn test_wrong_then_right_scores_false() {
        let mut session = QuizSession::new(BodyId::Earth, TWO_QUESTIONS);
        assert_eq!(session.select(1), AnswerOutcome::Wrong);
        let outcome = session.select(0);
        assert_eq!(
            outcome,
            AnswerOutcome::Correct(QuizResult { body: BodyId::Earth, correct: false })
        );
        assert_eq!(session.phase(), QuizPhase::ShowingSuccess);
    }

    #[test]
    fn test_two_question_run_records_results_in_order() {
        let mut results = QuizResults::default();
        let mut session = QuizSession::new(BodyId::Earth, TWO_QUESTIONS);

        assert_eq!(session.select(1), AnswerOutcome::Wrong);
        if let AnswerOutcome::Correct(result) = session.select(0) {
            results.push(result);
        }
        assert_eq!(run_pause(&mut session, SUCCESS_PAUSE), Some(QuizSignal::NextQuestion));

        if let AnswerOutcome::Correct(result) = session.select(0) {
            results.push(result);
        }
        assert_eq!(run_pause(&mut session, SUCCESS_PAUSE), Some(QuizSignal::Completed));
        assert_eq!(run_pause(&mut session, COMPLETE_PAUSE), Some(QuizSignal::ClosePanel));

        assert_eq!(
            results.0,
            vec![
                QuizResult { body: BodyId::Earth, correct: false },
                QuizResult { body: BodyId::Earth, correct: true },
            ]
        );
        assert_eq!(results.score(), Score { correct: 1, total: 2 });
    }

    #[test]
    fn test_wrong_option_is_idempotent() {
        let mut session = QuizSession::new(BodyId::Mars, TWO_QUESTIONS);
        assert_eq!(session.select(2), AnswerOutcome::Wrong);
        assert_eq!(session.select(2), AnswerOutcome::AlreadyMarked);
        assert_eq!(session.wrong_count(), 1);
        assert!(session.is_marked_wrong(2));
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
    }

    #[test]
    fn test_input_ignored_during_success_pause() {
        let mut session = QuizSession::new(BodyId::Mars, TWO_QUESTIONS);
        assert!(matches!(session.select(0), AnswerOutcome::Correct(_)));
        assert_eq!(session.select(0), AnswerOutcome::Ignored);
        assert_eq!(session.select(1), AnswerOutcome::Ignored);
    }

    #[test]
    fn test_out_of_range_option_ignored() {
        let mut session = QuizSession::new(BodyId::Mars, TWO_QUESTIONS);
        assert_eq!(session.select(17), AnswerOutcome::Ignored);
        assert_eq!(session.wrong_count(), 0);
    }

    #[test]
    fn test_success_pause_advances_and_clears_wrong_set() {
        let mut session = QuizSession::new(BodyId::Venus, TWO_QUESTIONS);
        session.select(2);
        session.select(0);

        assert_eq!(session.tick(Duration::from_millis(700)), None);
        assert_eq!(session.phase(), QuizPhase::ShowingSuccess);

        assert_eq!(session.tick(Duration::from_millis(900)), Some(QuizSignal::NextQuestion));
        assert_eq!(session.index(), 1);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
    }

    #[test]
    fn test_last_question_completes_then_closes() {
        let mut session = QuizSession::new(BodyId::Sun, ONE_QUESTION);
        session.select(0);
        assert_eq!(run_pause(&mut session, SUCCESS_PAUSE), Some(QuizSignal::Completed));
        assert_eq!(session.phase(), QuizPhase::Complete);
        assert!(session.current().is_none());

        assert_eq!(session.tick(Duration::from_millis(100)), None);
        assert_eq!(run_pause(&mut session, COMPLETE_PAUSE), Some(QuizSignal::ClosePanel));
        // Close is signalled once.
        assert_eq!(run_pause(&mut session, COMPLETE_PAUSE), None);
    }

    #[test]
    fn test_resume_skips_answered_questions() {
        let session = QuizSession::resume(BodyId::Earth, TWO_QUESTIONS, 1);
        assert_eq!(session.index(), 1);
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);

        let done = QuizSession::resume(BodyId::Earth, TWO_QUESTIONS, 5);
        assert_eq!(done.phase(), QuizPhase::Complete);
    }

    #[test]
    fn test_score_and_completion() {
        let mut results = QuizResults::default();
        assert_eq!(results.score().display_total(), 1);

        results.push(QuizResult { body: BodyId::Mars, correct: false });
        results.push(QuizResult { body: BodyId::Mars, correct: true });
        results.push(QuizResult { body: BodyId::Sun, correct: true });

        assert_eq!(results.score(), Score { correct: 2, total: 3 });
        assert_eq!(results.answered_for(BodyId::Mars), 2);
        assert!(results.is_complete(BodyId::Mars));
        assert!(!results.is_complete(BodyId::Sun));
    }

    #[test]
    fn test_reopening_never_exceeds_question_count() {
        let mut results = QuizResults::default();
        let mut active = ActiveQuiz::default();
        let body = BodyId::Earth;
        let count = body.data().quiz.len();

        // Answer the first question, then abandon the quiz.
        active.open(body, &results);
        let correct = body.data().quiz[0].correct;
        if let Some(AnswerOutcome::Correct(result)) = active.session_mut().map(|s| s.select(correct)) {
            results.push(result);
        }
        active.close();

        // Reopen and finish everything that is left.
        active.open(body, &results);
        assert_eq!(active.session().map(|s| s.index()), Some(1));
        while let Some(session) = active.session_mut() {
            let Some(question) = session.current() else { break };
            if let AnswerOutcome::Correct(result) = session.select(question.correct) {
                results.push(result);
            }
            session.tick(SUCCESS_PAUSE + Duration::from_millis(1));
        }
        assert_eq!(results.answered_for(body), count);

        // A finished body opens straight into Complete.
        active.open(body, &results);
        assert_eq!(active.session().map(|s| s.phase()), Some(QuizPhase::Complete));
        assert_eq!(results.answered_for(body), count);
    }

    #[test]
    fn test_selection_change_abandons_quiz() {
        let results = QuizResults::default();
        let mut active = ActiveQuiz::default();
        active.open(BodyId::Mars, &results);

        active.follow_selection(Some(BodyId::Mars));
        assert!(active.is_open());

        active.follow_selection(Some(BodyId::Venus));
        assert!(!active.is_open());

        active.open(BodyId::Mars, &results);
        active.follow_selection(None);
        assert!(!active.is_open());
    }
}

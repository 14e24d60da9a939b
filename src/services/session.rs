use crate::{
    errors::{AppError, AppResult},
    models::domain::{question::OPTION_COUNT, AnswerRecord, GradedAttempt, Question, Quiz},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InProgress,
    AwaitingSubmit,
}

/// Progress through one quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSession {
    quiz: Quiz,
    answers: Vec<AnswerRecord>,
    score: u32,
    current_index: usize,
}

impl ActiveSession {
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// `None` once every question has been answered.
    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index)
    }
}

/// `Idle -> InProgress -> AwaitingSubmit -> Idle`, with `exit` back to
/// `Idle` from either active state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum QuizSession {
    #[default]
    Idle,
    InProgress(ActiveSession),
    AwaitingSubmit(ActiveSession),
}

impl QuizSession {
    pub fn state(&self) -> SessionState {
        match self {
            QuizSession::Idle => SessionState::Idle,
            QuizSession::InProgress(_) => SessionState::InProgress,
            QuizSession::AwaitingSubmit(_) => SessionState::AwaitingSubmit,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            QuizSession::Idle => None,
            QuizSession::InProgress(active) | QuizSession::AwaitingSubmit(active) => Some(active),
        }
    }

    pub fn quiz_id(&self) -> Option<&str> {
        self.active().map(|active| active.quiz.id.as_str())
    }

    pub fn start(&mut self, quiz: Quiz) -> AppResult<()> {
        if !matches!(self, QuizSession::Idle) {
            return Err(AppError::InvalidState(
                "Finish or exit the current quiz first".to_string(),
            ));
        }
        if quiz.questions.is_empty() {
            return Err(AppError::Validation(format!(
                "Quiz '{}' has no questions",
                quiz.title
            )));
        }

        log::debug!("Starting quiz {} ({} questions)", quiz.id, quiz.questions.len());
        *self = QuizSession::InProgress(ActiveSession {
            quiz,
            answers: Vec::new(),
            score: 0,
            current_index: 0,
        });
        Ok(())
    }

    /// Records the answer to the current question and advances.
    pub fn answer(&mut self, selected_index: usize) -> AppResult<SessionState> {
        if selected_index >= OPTION_COUNT {
            return Err(AppError::Validation(format!(
                "Selected option {} is out of range",
                selected_index
            )));
        }

        let QuizSession::InProgress(active) = self else {
            return Err(AppError::InvalidState(
                "No question is awaiting an answer".to_string(),
            ));
        };

        let question_index = active.current_index;
        let correct = active
            .current_question()
            .map(|question| question.is_correct(selected_index))
            .unwrap_or(false);

        active.answers.push(AnswerRecord {
            question_index,
            selected_index,
            correct,
        });
        if correct {
            active.score += 1;
        }
        // advances past the last question too
        active.current_index += 1;

        if active.current_index == active.total_questions() {
            if let QuizSession::InProgress(active) = std::mem::take(self) {
                *self = QuizSession::AwaitingSubmit(active);
            }
        }

        Ok(self.state())
    }

    /// Grades the finished session without leaving `AwaitingSubmit`, so a
    /// failed save can be retried.
    pub fn graded_attempt(&self) -> AppResult<GradedAttempt> {
        let QuizSession::AwaitingSubmit(active) = self else {
            return Err(AppError::InvalidState(
                "Answer every question before submitting".to_string(),
            ));
        };

        Ok(GradedAttempt {
            quiz_id: active.quiz.id.clone(),
            quiz_title: active.quiz.title.clone(),
            answers: active.answers.clone(),
            score: active.score,
            total_questions: u32::try_from(active.total_questions()).unwrap_or(u32::MAX),
        })
    }

    pub fn exit(&mut self) -> AppResult<()> {
        if matches!(self, QuizSession::Idle) {
            return Err(AppError::InvalidState("No quiz in progress".to_string()));
        }
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = QuizSession::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{capitals_quiz, quiz_with_questions};

    #[test]
    fn correct_single_answer_awaits_submit_with_full_score() {
        let mut session = QuizSession::default();
        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();

        let state = session.answer(0).unwrap();

        assert_eq!(state, SessionState::AwaitingSubmit);
        let attempt = session.graded_attempt().unwrap();
        assert_eq!(attempt.score, 1);
        assert_eq!(attempt.total_questions, 1);
        assert_eq!(attempt.percentage(), 100.0);
    }

    #[test]
    fn wrong_answer_scores_zero() {
        let mut session = QuizSession::default();
        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();
        session.answer(1).unwrap();

        let attempt = session.graded_attempt().unwrap();
        assert_eq!(attempt.score, 0);
        assert_eq!(attempt.percentage(), 0.0);
        assert!(!attempt.answers[0].correct);
    }

    #[test]
    fn n_answers_end_awaiting_submit_and_score_counts_matches() {
        let quiz = quiz_with_questions("quiz-3", "teacher-1", &[0, 1, 2, 3, 0]);
        let picks = [0, 2, 2, 3, 1];

        let mut session = QuizSession::default();
        session.start(quiz).unwrap();
        for (i, pick) in picks.iter().enumerate() {
            assert_eq!(session.state(), SessionState::InProgress);
            assert_eq!(session.active().unwrap().current_index(), i);
            session.answer(*pick).unwrap();
        }

        assert_eq!(session.state(), SessionState::AwaitingSubmit);
        let active = session.active().unwrap();
        assert_eq!(active.current_index(), 5);
        assert!(active.current_question().is_none());
        assert_eq!(active.score(), 3);

        let indices: Vec<usize> = active.answers().iter().map(|a| a.question_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn one_in_three_is_unrounded_percentage() {
        let quiz = quiz_with_questions("quiz-3", "teacher-1", &[0, 0, 0]);
        let mut session = QuizSession::default();
        session.start(quiz).unwrap();
        session.answer(0).unwrap();
        session.answer(1).unwrap();
        session.answer(1).unwrap();

        let pct = session.graded_attempt().unwrap().percentage();
        assert!((pct - 33.333_333_333_333_336).abs() < 1e-12);
    }

    #[test]
    fn answer_outside_in_progress_is_rejected() {
        let mut session = QuizSession::default();
        assert!(matches!(session.answer(0), Err(AppError::InvalidState(_))));

        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();
        session.answer(0).unwrap();
        assert!(matches!(session.answer(0), Err(AppError::InvalidState(_))));
        assert_eq!(session.active().unwrap().answers().len(), 1);
    }

    #[test]
    fn out_of_range_selection_does_not_advance() {
        let mut session = QuizSession::default();
        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();

        assert!(matches!(session.answer(4), Err(AppError::Validation(_))));
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.active().unwrap().answers().is_empty());
    }

    #[test]
    fn unsatisfiable_question_never_scores() {
        let mut quiz = capitals_quiz("quiz-1", "teacher-1");
        quiz.questions[0].correct_answer = Some(9);

        let mut session = QuizSession::default();
        session.start(quiz).unwrap();
        session.answer(0).unwrap();

        assert_eq!(session.graded_attempt().unwrap().score, 0);
    }

    #[test]
    fn graded_attempt_requires_awaiting_submit() {
        let mut session = QuizSession::default();
        session
            .start(quiz_with_questions("quiz-2", "teacher-1", &[0, 0]))
            .unwrap();
        session.answer(0).unwrap();

        assert!(matches!(
            session.graded_attempt(),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn exit_discards_from_either_active_state() {
        let mut session = QuizSession::default();
        assert!(session.exit().is_err());

        session
            .start(quiz_with_questions("quiz-2", "teacher-1", &[0, 0]))
            .unwrap();
        session.exit().unwrap();
        assert_eq!(session.state(), SessionState::Idle);

        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();
        session.answer(0).unwrap();
        session.exit().unwrap();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.quiz_id().is_none());
    }

    #[test]
    fn start_rejects_empty_quiz_and_double_start() {
        let mut session = QuizSession::default();
        let empty = quiz_with_questions("quiz-0", "teacher-1", &[]);
        assert!(matches!(session.start(empty), Err(AppError::Validation(_))));

        session.start(capitals_quiz("quiz-1", "teacher-1")).unwrap();
        assert!(matches!(
            session.start(capitals_quiz("quiz-1", "teacher-1")),
            Err(AppError::InvalidState(_))
        ));
    }
}

#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;

    use crate::models::domain::{AnswerRecord, AuthUser, Question, Quiz, QuizResult};

    /// The one-question "Capitals" quiz; option 0 is correct.
    pub fn capitals_quiz(id: &str, created_by: &str) -> Quiz {
        Quiz {
            id: id.to_string(),
            title: "Capitals".to_string(),
            description: "European capitals".to_string(),
            created_by: created_by.to_string(),
            is_active: true,
            questions: vec![Question::new(
                "Capital of France?",
                ["Paris", "Rome", "Berlin", "Madrid"],
                0,
            )],
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    /// A quiz with one question per entry of `correct_answers`.
    pub fn quiz_with_questions(id: &str, created_by: &str, correct_answers: &[usize]) -> Quiz {
        let mut quiz = capitals_quiz(id, created_by);
        quiz.title = format!("Quiz {}", id);
        quiz.questions = correct_answers
            .iter()
            .enumerate()
            .map(|(i, correct)| {
                Question::new(&format!("Question {}", i + 1), ["A", "B", "C", "D"], *correct)
            })
            .collect();
        quiz
    }

    pub fn result_for(id: &str, quiz_id: &str, user_id: &str, score: u32, total: u32) -> QuizResult {
        QuizResult {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            quiz_title: format!("Quiz {}", quiz_id),
            user_id: user_id.to_string(),
            user_name: format!("User {}", user_id),
            answers: vec![AnswerRecord {
                question_index: 0,
                selected_index: 0,
                correct: score > 0,
            }],
            score,
            total_questions: total,
            percentage: f64::from(score) / f64::from(total) * 100.0,
            completed_at: Utc::now(),
        }
    }

    pub fn student() -> AuthUser {
        AuthUser::new("student-1", Some("Sam Student"), Some("sam@example.com"))
    }

    pub fn teacher() -> AuthUser {
        AuthUser::new("teacher-1", Some("Tess Teacher"), Some("tess@example.com"))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_capitals_quiz() {
        let quiz = capitals_quiz("quiz-1", "teacher-1");
        assert_eq!(quiz.title, "Capitals");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_index(), Some(0));
    }

    #[test]
    fn test_fixtures_quiz_with_questions() {
        let quiz = quiz_with_questions("quiz-2", "teacher-1", &[3, 1]);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_index(), Some(3));
        assert_eq!(quiz.questions[1].correct_index(), Some(1));
    }

    #[test]
    fn test_fixtures_result_for() {
        let result = result_for("r-1", "quiz-1", "student-1", 1, 2);
        assert_eq!(result.percentage, 50.0);
        assert!(result.belongs_to("student-1", "quiz-1"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    #[serde(default)]
    pub quiz_title: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_index: usize,
    pub correct: bool,
}

/// A graded attempt that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct GradedAttempt {
    pub quiz_id: String,
    pub quiz_title: String,
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub total_questions: u32,
}

impl GradedAttempt {
    /// `score / total * 100`, not rounded.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }
}

impl QuizResult {
    pub fn from_attempt(attempt: GradedAttempt, user_id: &str, user_name: &str) -> Self {
        let percentage = attempt.percentage();
        QuizResult {
            id: Uuid::new_v4().to_string(),
            quiz_id: attempt.quiz_id,
            quiz_title: attempt.quiz_title,
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            answers: attempt.answers,
            score: attempt.score,
            total_questions: attempt.total_questions,
            percentage,
            completed_at: Utc::now(),
        }
    }

    pub fn belongs_to(&self, user_id: &str, quiz_id: &str) -> bool {
        self.user_id == user_id && self.quiz_id == quiz_id
    }
}

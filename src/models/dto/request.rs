use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question::OPTION_COUNT;
use crate::models::domain::{Question, Quiz, QuizContent, Role};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Please fill in all fields".into());
        return Err(err);
    }
    Ok(())
}

/// The question currently being composed in the authoring form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    pub correct_answer: usize,
}

impl QuestionDraft {
    pub fn to_question(&self) -> AppResult<Question> {
        let question = Question {
            question: self.question.clone(),
            options: self.options.clone(),
            correct_answer: i32::try_from(self.correct_answer).ok(),
        };

        if !question.is_complete() {
            return Err(AppError::Validation(
                "Please fill in all question fields".to_string(),
            ));
        }
        if question.correct_index().is_none() {
            return Err(AppError::Validation(format!(
                "Correct answer must be between 0 and {}",
                OPTION_COUNT - 1
            )));
        }
        Ok(question)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct QuizForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    #[validate(length(min = 1, message = "Please add at least one question"))]
    pub questions: Vec<Question>,

    #[serde(default)]
    pub pending: QuestionDraft,
}

impl QuizForm {
    pub fn load(quiz: &Quiz) -> Self {
        QuizForm {
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions: quiz.questions.clone(),
            pending: QuestionDraft::default(),
        }
    }

    /// Moves the pending question into the question list.
    pub fn add_question(&mut self) -> AppResult<()> {
        let question = self.pending.to_question()?;
        self.questions.push(question);
        self.pending = QuestionDraft::default();
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) -> AppResult<Question> {
        if index >= self.questions.len() {
            return Err(AppError::NotFound(format!("Question {} not in form", index)));
        }
        Ok(self.questions.remove(index))
    }

    pub fn reset(&mut self) {
        *self = QuizForm::default();
    }

    pub fn to_content(&self) -> AppResult<QuizContent> {
        self.validate()?;
        Ok(QuizContent {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            questions: self.questions.clone(),
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match!"))]
    pub confirm_password: String,

    #[serde(default)]
    pub role: Role,
}

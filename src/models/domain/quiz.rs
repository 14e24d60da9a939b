use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question::Question;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_by: String, // uid of the authoring teacher
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Fields a teacher controls when creating or replacing a quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizContent {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(content: QuizContent, created_by: &str) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title: content.title,
            description: content.description,
            created_by: created_by.to_string(),
            is_active: true,
            questions: content.questions,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.created_by == user_id
    }
}

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizContent},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Replaces title, description and questions; returns the stored quiz.
    async fn update(&self, id: &str, content: QuizContent) -> AppResult<Quiz>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// RFC 3339 in the same `Z` form serde writes for `DateTime<Utc>`.
fn stored_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.quizzes(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let creator_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(IndexOptions::builder().name("created_by".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(creator_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        let cursor = self.collection.find(doc! {}).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn update(&self, id: &str, content: QuizContent) -> AppResult<Quiz> {
        let questions = bson::to_bson(&content.questions)?;
        let updated_at = stored_timestamp(Utc::now());

        let result = self
            .collection
            .update_one(
                doc! { "id": id },
                doc! {
                    "$set": {
                        "title": &content.title,
                        "description": &content.description,
                        "questions": questions,
                        "updatedAt": &updated_at,
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", id)));
        }

        Ok(())
    }
}

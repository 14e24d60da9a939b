use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::QuizResult,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult>;
    async fn find_all(&self) -> AppResult<Vec<QuizResult>>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuizResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizResultRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.results(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "quizId": 1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        let quiz_id_index = IndexModel::builder()
            .keys(doc! { "quizId": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_quiz_index).await?;
        self.collection.create_index(quiz_id_index).await?;

        log::info!("Successfully created indexes for quiz results collection");
        Ok(())
    }
}

#[async_trait]
impl QuizResultRepository for MongoQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn find_all(&self) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! {})
            .sort(doc! { "completedAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self
            .collection
            .find(doc! { "quizId": quiz_id })
            .sort(doc! { "completedAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(results)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Quiz result with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

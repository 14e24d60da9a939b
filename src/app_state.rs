use std::sync::Arc;

use crate::{
    auth::{FileStorage, LocalStorage},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizRepository, MongoQuizResultRepository, QuizRepository, QuizResultRepository,
    },
    services::reconciliation::{self, ReconcileReport},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_repository: Arc<dyn QuizRepository>,
    pub result_repository: Arc<dyn QuizResultRepository>,
    pub storage: Arc<dyn LocalStorage>,
}

impl AppState {
    pub async fn new(config: &Config) -> AppResult<Self> {
        let db = Database::connect(config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoQuizResultRepository::new(&db));
        result_repository.ensure_indexes().await?;

        let storage = Arc::new(FileStorage::new(&config.role_store_path));

        Ok(Self {
            quiz_repository,
            result_repository,
            storage,
        })
    }

    pub async fn reconcile_orphans(&self) -> AppResult<ReconcileReport> {
        reconciliation::reconcile_orphans(
            self.quiz_repository.as_ref(),
            self.result_repository.as_ref(),
        )
        .await
    }
}

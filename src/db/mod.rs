use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{Quiz, QuizResult},
};

/// Handle on the quiz database and its two collections.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
    quizzes_collection: String,
    results_collection: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options =
            ClientOptions::parse(config.mongo_conn_string.expose_secret()).await?;

        client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        client_options.app_name = Some("quizdesk".to_string());
        client_options.max_pool_size = Some(4);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.mongo_db_name);

        db.run_command(doc! { "ping": 1 }).await?;

        log::info!(
            "Connected to MongoDB database '{}' (quizzes: '{}', results: '{}')",
            config.mongo_db_name,
            config.quizzes_collection,
            config.results_collection
        );

        Ok(Self {
            db,
            quizzes_collection: config.quizzes_collection.clone(),
            results_collection: config.results_collection.clone(),
        })
    }

    pub fn quizzes(&self) -> Collection<Quiz> {
        self.db.collection(&self.quizzes_collection)
    }

    pub fn results(&self) -> Collection<QuizResult> {
        self.db.collection(&self.results_collection)
    }
}

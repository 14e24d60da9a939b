use secrecy::SecretString;
use std::env;

const DEFAULT_CONN_STRING: &str = "mongodb://localhost:27017";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub results_collection: String,
    pub role_store_path: String,
    pub reconcile_on_start: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING").unwrap_or_else(|_| DEFAULT_CONN_STRING.to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizdesk-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            results_collection: env::var("RESULTS_COLLECTION")
                .unwrap_or_else(|_| "quizResults".to_string()),
            role_store_path: env::var("ROLE_STORE_PATH")
                .unwrap_or_else(|_| ".quizdesk-session.json".to_string()),
            reconcile_on_start: env::var("RECONCILE_ON_START")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the database still points at the local default
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.mongo_conn_string.expose_secret() == DEFAULT_CONN_STRING {
            panic!(
                "FATAL: MONGO_CONN_STRING is using default value! Set MONGO_CONN_STRING to the production cluster."
            );
        }

        if self.mongo_db_name.ends_with("-local") {
            panic!(
                "FATAL: MONGO_DB_NAME is using a local database name ({}).",
                self.mongo_db_name
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from(DEFAULT_CONN_STRING.to_string()),
            mongo_db_name: "quizdesk-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            results_collection: "quizResults".to_string(),
            role_store_path: "target/test-session.json".to_string(),
            reconcile_on_start: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_db_name.is_empty());
        assert!(!config.quizzes_collection.is_empty());
        assert!(!config.results_collection.is_empty());
    }

    #[test]
    fn test_test_config() {
        use secrecy::ExposeSecret;

        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string.expose_secret(), "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "quizdesk-test");
        assert_eq!(config.results_collection, "quizResults");
    }

    #[test]
    #[should_panic(expected = "MONGO_CONN_STRING")]
    fn test_validate_for_production_rejects_default_connection() {
        Config::test_config().validate_for_production();
    }
}

use quizdesk::{app_state::AppState, auth::USER_TYPE_KEY, config::Config};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let state = match AppState::new(&config).await {
        Ok(state) => state,
        Err(err) => {
            log::error!("Startup failed: {}", err.user_message());
            std::process::exit(1);
        }
    };

    match state.storage.get(USER_TYPE_KEY) {
        Some(role) => log::info!("Stored session role: {}", role),
        None => log::info!("No stored session role"),
    }

    if !config.reconcile_on_start {
        log::info!("Orphan reconciliation disabled");
        return;
    }

    match state.reconcile_orphans().await {
        Ok(report) => log::info!(
            "Reconciliation finished: {} results kept, {} orphaned, {} deleted, {} failed",
            report.kept.len(),
            report.orphaned,
            report.outcome.deleted,
            report.outcome.failed
        ),
        Err(err) => {
            log::error!("Reconciliation failed: {}", err.user_message());
            std::process::exit(1);
        }
    }
}

use std::collections::HashSet;

use futures::future::join_all;

use crate::{
    errors::AppResult,
    models::domain::{Quiz, QuizResult},
    repositories::{QuizRepository, QuizResultRepository},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchDeleteOutcome {
    pub deleted: usize,
    pub failed: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReconcileReport {
    pub kept: Vec<QuizResult>,
    pub orphaned: usize,
    pub outcome: BatchDeleteOutcome,
}

/// Splits results into those whose quiz exists and the orphans.
pub fn partition_orphans(
    results: Vec<QuizResult>,
    quizzes: &[Quiz],
) -> (Vec<QuizResult>, Vec<QuizResult>) {
    let quiz_ids: HashSet<&str> = quizzes.iter().map(|q| q.id.as_str()).collect();
    results
        .into_iter()
        .partition(|result| quiz_ids.contains(result.quiz_id.as_str()))
}

/// Deletes every result concurrently. Individual failures are logged and
/// counted; deletes that succeeded stay deleted.
pub async fn delete_results(
    repository: &dyn QuizResultRepository,
    results: &[QuizResult],
) -> BatchDeleteOutcome {
    let outcomes = join_all(results.iter().map(|result| async move {
        (result.id.as_str(), repository.delete(&result.id).await)
    }))
    .await;

    let mut batch = BatchDeleteOutcome::default();
    for (id, outcome) in outcomes {
        match outcome {
            Ok(()) => batch.deleted += 1,
            Err(err) => {
                log::warn!("Failed to delete quiz result {}: {}", id, err);
                batch.failed += 1;
            }
        }
    }
    batch
}

/// Drops orphaned results from `results`, deleting them from the database.
pub async fn reconcile(
    repository: &dyn QuizResultRepository,
    results: Vec<QuizResult>,
    quizzes: &[Quiz],
) -> ReconcileReport {
    let (kept, orphaned) = partition_orphans(results, quizzes);
    if orphaned.is_empty() {
        return ReconcileReport {
            kept,
            ..Default::default()
        };
    }

    log::info!("Found {} orphaned results, cleaning up", orphaned.len());
    let outcome = delete_results(repository, &orphaned).await;
    if outcome.failed > 0 {
        log::warn!(
            "{} of {} orphaned results could not be deleted",
            outcome.failed,
            orphaned.len()
        );
    }

    ReconcileReport {
        kept,
        orphaned: orphaned.len(),
        outcome,
    }
}

/// Database-wide pass: loads both collections and removes orphans.
pub async fn reconcile_orphans(
    quizzes: &dyn QuizRepository,
    results: &dyn QuizResultRepository,
) -> AppResult<ReconcileReport> {
    let catalog = quizzes.find_all().await?;
    let ledger = results.find_all().await?;
    Ok(reconcile(results, ledger, &catalog).await)
}

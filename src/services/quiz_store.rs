use std::sync::Arc;

use tokio::sync::watch;
use validator::Validate;

use crate::{
    auth::{clear_role, persist_role, restore_role, IdentityService, LocalStorage},
    errors::{AppError, AppResult},
    models::{
        domain::{AuthUser, Quiz, QuizResult, Role},
        dto::request::{QuizForm, RegisterForm},
    },
    repositories::{QuizRepository, QuizResultRepository},
    services::{
        navigation::{Invalidation, Navigator},
        reconciliation::{self, BatchDeleteOutcome, ReconcileReport},
        results_report::{self, ResultsReport},
        session::{QuizSession, SessionState},
    },
};

/// Client-side state for one signed-in user: quiz catalog, result ledger,
/// the quiz being taken, the authoring form and the current view.
///
/// Local caches change only after the database confirms a write.
pub struct QuizStore {
    quiz_repository: Arc<dyn QuizRepository>,
    result_repository: Arc<dyn QuizResultRepository>,
    identity: Arc<dyn IdentityService>,
    storage: Arc<dyn LocalStorage>,
    auth_changes: watch::Receiver<Option<AuthUser>>,
    user: Option<AuthUser>,
    role: Role,
    catalog: Vec<Quiz>,
    catalog_loaded: bool,
    ledger: Vec<QuizResult>,
    session: QuizSession,
    form: QuizForm,
    navigator: Navigator,
}

impl QuizStore {
    pub fn new(
        quiz_repository: Arc<dyn QuizRepository>,
        result_repository: Arc<dyn QuizResultRepository>,
        identity: Arc<dyn IdentityService>,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        let auth_changes = identity.subscribe();
        Self {
            quiz_repository,
            result_repository,
            identity,
            storage,
            auth_changes,
            user: None,
            role: Role::default(),
            catalog: Vec::new(),
            catalog_loaded: false,
            ledger: Vec::new(),
            session: QuizSession::default(),
            form: QuizForm::default(),
            navigator: Navigator::default(),
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.catalog
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.ledger
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn form(&self) -> &QuizForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuizForm {
        &mut self.form
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    fn require_user(&self) -> AppResult<&AuthUser> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
    }

    fn catalog_quiz(&self, quiz_id: &str) -> AppResult<&Quiz> {
        self.catalog
            .iter()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| AppError::StaleQuiz(quiz_id.to_string()))
    }

    fn require_creator(&self, quiz_id: &str) -> AppResult<&Quiz> {
        let user = self.require_user()?;
        let quiz = self.catalog_quiz(quiz_id)?;
        if !quiz.is_created_by(&user.uid) {
            return Err(AppError::Unauthorized(
                "Only the quiz creator can change this quiz".to_string(),
            ));
        }
        Ok(quiz)
    }

    pub async fn sign_in(&mut self, role: Role) -> AppResult<()> {
        let user = self.identity.sign_in().await?;
        persist_role(self.storage.as_ref(), role)?;
        log::info!("Signed in {} as {}", user.uid, role);
        self.handle_auth_change(Some(user)).await?;
        // already applied; don't replay the provider's notification
        self.auth_changes.borrow_and_update();
        Ok(())
    }

    pub async fn register(&mut self, form: &RegisterForm) -> AppResult<()> {
        form.validate()?;
        self.sign_in(form.role).await
    }

    pub async fn sign_out(&mut self) -> AppResult<()> {
        self.identity.sign_out().await?;
        self.handle_auth_change(None).await?;
        self.auth_changes.borrow_and_update();
        Ok(())
    }

    /// Waits for the identity provider to report a change and applies it.
    /// Returns `false` once the provider has gone away.
    pub async fn wait_for_auth_change(&mut self) -> AppResult<bool> {
        if self.auth_changes.changed().await.is_err() {
            return Ok(false);
        }
        let user = self.auth_changes.borrow_and_update().clone();
        self.handle_auth_change(user).await?;
        Ok(true)
    }

    pub async fn handle_auth_change(&mut self, user: Option<AuthUser>) -> AppResult<()> {
        match user {
            Some(user) => {
                self.role = restore_role(self.storage.as_ref())?;
                self.user = Some(user);
                self.navigator.go_to_dashboard();
                self.refresh_quizzes().await?;
                self.refresh_results().await?;
            }
            None => {
                self.user = None;
                self.role = Role::default();
                self.catalog.clear();
                self.catalog_loaded = false;
                self.ledger.clear();
                self.session.reset();
                self.form.reset();
                self.navigator.go_to_login();
                clear_role(self.storage.as_ref())?;
            }
        }
        Ok(())
    }

    pub async fn refresh_quizzes(&mut self) -> AppResult<()> {
        let quizzes = self.quiz_repository.find_all().await.map_err(|err| {
            log::error!("Failed to fetch quizzes: {}", err);
            err
        })?;
        log::debug!("Fetched {} quizzes", quizzes.len());
        self.catalog = quizzes;
        self.catalog_loaded = true;
        Ok(())
    }

    /// Full ledger refresh. Orphaned results are deleted and dropped.
    pub async fn refresh_results(&mut self) -> AppResult<ReconcileReport> {
        if !self.catalog_loaded {
            self.refresh_quizzes().await?;
        }

        let fetched = self.result_repository.find_all().await.map_err(|err| {
            log::error!("Failed to fetch results: {}", err);
            err
        })?;
        let report =
            reconciliation::reconcile(self.result_repository.as_ref(), fetched, &self.catalog)
                .await;
        self.ledger = report.kept.clone();
        Ok(report)
    }

    /// Refreshes only the results of one quiz; no reconciliation.
    pub async fn refresh_results_for_quiz(&mut self, quiz_id: &str) -> AppResult<()> {
        let fetched = self.result_repository.find_by_quiz(quiz_id).await?;
        self.ledger.retain(|r| r.quiz_id != quiz_id);
        self.ledger.extend(fetched);
        Ok(())
    }

    /// Re-reads whatever `invalidation` names.
    pub async fn revalidate(&mut self, invalidation: Invalidation) -> AppResult<()> {
        if invalidation.quizzes {
            self.refresh_quizzes().await?;
        }
        if invalidation.results {
            self.refresh_results().await?;
        }
        Ok(())
    }

    pub async fn show_results(&mut self) -> AppResult<()> {
        let invalidation = self.navigator.go_to_results();
        self.revalidate(invalidation).await
    }

    pub fn begin_create_quiz(&mut self) {
        self.form.reset();
        self.navigator.go_to_create_quiz();
    }

    pub fn begin_edit_quiz(&mut self, quiz_id: &str) -> AppResult<()> {
        let form = QuizForm::load(self.require_creator(quiz_id)?);
        self.form = form;
        self.navigator.go_to_edit_quiz(quiz_id);
        Ok(())
    }

    pub async fn create_quiz(&mut self) -> AppResult<Invalidation> {
        let user = self.require_user()?;
        if self.role != Role::Teacher {
            return Err(AppError::Unauthorized(
                "Only teachers can create quizzes".to_string(),
            ));
        }
        let content = self.form.to_content()?;
        let quiz = Quiz::new(content, &user.uid);

        let saved = self.quiz_repository.create(quiz).await.map_err(|err| {
            log::error!("Failed to add quiz: {}", err);
            err
        })?;
        log::info!("Created quiz {} ({})", saved.id, saved.title);

        self.catalog.push(saved);
        self.form.reset();
        self.navigator.go_to_dashboard();
        Ok(Invalidation::QUIZZES)
    }

    pub async fn update_quiz(&mut self, quiz_id: &str) -> AppResult<Invalidation> {
        self.require_creator(quiz_id)?;
        let content = self.form.to_content()?;

        let updated = self
            .quiz_repository
            .update(quiz_id, content)
            .await
            .map_err(|err| {
                log::error!("Failed to update quiz {}: {}", quiz_id, err);
                err
            })?;
        log::info!("Updated quiz {}", quiz_id);

        if let Some(slot) = self.catalog.iter_mut().find(|q| q.id == quiz_id) {
            *slot = updated;
        }
        self.form.reset();
        self.navigator.go_to_dashboard();
        Ok(Invalidation::QUIZZES)
    }

    /// Deletes the quiz's results, then the quiz, then every local
    /// reference to it.
    pub async fn delete_quiz(&mut self, quiz_id: &str) -> AppResult<Invalidation> {
        self.require_creator(quiz_id)?;

        let results = self.result_repository.find_by_quiz(quiz_id).await?;
        let outcome: BatchDeleteOutcome =
            reconciliation::delete_results(self.result_repository.as_ref(), &results).await;
        log::info!(
            "Deleted {} results for quiz {} ({} failed)",
            outcome.deleted,
            quiz_id,
            outcome.failed
        );

        match self.quiz_repository.delete(quiz_id).await {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => {
                log::warn!("Quiz {} was already gone from the database", quiz_id);
            }
            Err(err) => {
                log::error!("Failed to delete quiz {}: {}", quiz_id, err);
                return Err(err);
            }
        }

        self.catalog.retain(|q| q.id != quiz_id);
        self.ledger.retain(|r| r.quiz_id != quiz_id);
        if self.session.quiz_id() == Some(quiz_id) {
            self.session.reset();
        }
        if self.navigator.viewed_quiz() == Some(quiz_id) {
            self.form.reset();
        }
        self.navigator.forget_quiz(quiz_id);
        Ok(Invalidation::ALL)
    }

    pub fn has_taken(&self, quiz_id: &str) -> bool {
        self.user
            .as_ref()
            .map(|user| self.ledger.iter().any(|r| r.belongs_to(&user.uid, quiz_id)))
            .unwrap_or(false)
    }

    pub fn my_result(&self, quiz_id: &str) -> Option<&QuizResult> {
        let user = self.user.as_ref()?;
        self.ledger.iter().find(|r| r.belongs_to(&user.uid, quiz_id))
    }

    /// Starts a session on a cached quiz. A quiz missing from the catalog
    /// fails with `StaleQuiz` after the catalog and ledger are re-read.
    pub async fn start_quiz(&mut self, quiz_id: &str) -> AppResult<()> {
        self.require_user()?;
        let quiz = match self.catalog_quiz(quiz_id).cloned() {
            Ok(quiz) => quiz,
            Err(err) => {
                log::warn!("Refusing to start missing quiz {}", quiz_id);
                if let Err(refresh_err) = self.revalidate(Invalidation::ALL).await {
                    log::error!("Refresh after stale quiz failed: {}", refresh_err);
                }
                return Err(err);
            }
        };
        if self.role == Role::Student && self.has_taken(quiz_id) {
            return Err(AppError::AlreadyTaken(quiz_id.to_string()));
        }

        self.session.start(quiz)?;
        self.navigator.go_to_take_quiz(quiz_id);
        Ok(())
    }

    pub fn answer(&mut self, selected_index: usize) -> AppResult<SessionState> {
        self.session.answer(selected_index)
    }

    /// Saves the finished attempt. On failure the session stays ready to
    /// submit again.
    pub async fn submit(&mut self) -> AppResult<QuizResult> {
        let attempt = self.session.graded_attempt()?;
        let user = self.require_user()?;
        let result = QuizResult::from_attempt(attempt, &user.uid, user.result_name());

        let saved = self.result_repository.create(result).await.map_err(|err| {
            log::error!("Failed to save result: {}", err);
            err
        })?;
        log::info!(
            "Saved result {} for quiz {}: {}/{}",
            saved.id,
            saved.quiz_id,
            saved.score,
            saved.total_questions
        );

        self.ledger.push(saved.clone());
        self.session.reset();
        self.navigator.go_to_dashboard();
        Ok(saved)
    }

    pub fn exit_quiz(&mut self) -> AppResult<()> {
        self.session.exit()?;
        self.navigator.go_to_dashboard();
        Ok(())
    }

    pub fn report(&self) -> ResultsReport {
        results_report::build_report(&self.catalog, &self.ledger)
    }

    pub fn my_results(&self) -> Vec<&QuizResult> {
        match &self.user {
            Some(user) => results_report::results_for_user(&self.ledger, &user.uid),
            None => Vec::new(),
        }
    }

    pub fn my_quizzes(&self) -> Vec<&Quiz> {
        match &self.user {
            Some(user) => self
                .catalog
                .iter()
                .filter(|q| q.is_created_by(&user.uid))
                .collect(),
            None => Vec::new(),
        }
    }
}

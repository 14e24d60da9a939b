use async_trait::async_trait;
use tokio::sync::watch;

use crate::{errors::AppResult, models::domain::AuthUser};

/// Third-party identity provider.
///
/// `sign_in` runs the provider's interactive flow and yields the user; the
/// provider also publishes every change of the signed-in user (including
/// sign-out and session restore) on the channel returned by `subscribe`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn sign_in(&self) -> AppResult<AuthUser>;
    async fn sign_out(&self) -> AppResult<()>;
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

pub mod navigation;
pub mod quiz_store;
pub mod reconciliation;
pub mod results_report;
pub mod session;

pub use navigation::{Invalidation, Navigator, View};
pub use quiz_store::QuizStore;
pub use session::{QuizSession, SessionState};

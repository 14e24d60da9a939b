pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod user;
pub use question::Question;
pub use quiz::{Quiz, QuizContent};
pub use quiz_result::{AnswerRecord, GradedAttempt, QuizResult};
pub use user::{AuthUser, Role};

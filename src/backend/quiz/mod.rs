//! Question provider seam and its PostgreSQL implementation.

/// Question selection and answer checking
pub mod provider;

pub use provider::{PgQuestionProvider, QuestionProvider};

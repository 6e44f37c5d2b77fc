//! Core value types shared across the engine

mod level;
mod question;
mod scope;

pub use level::{DifficultyLevel, Grade};
pub use question::{Question, QuestionBank};
pub use scope::{Role, scoped_key};

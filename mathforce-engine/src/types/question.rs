//! Question bank items

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// A multiple-choice question as the engine reads it from the bank.
///
/// Only `grade`, `difficulty`, `topic` and `correct` drive engine decisions;
/// the prompt and options are carried for session runners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub grade: u8,
    /// Raw difficulty of the item (1-5).
    pub difficulty: u8,
    pub topic: String,
    #[serde(default, rename = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index of the correct option.
    pub correct: usize,
}

impl Question {
    /// Whether the chosen option index is the correct one.
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

/// An in-memory question bank loaded from a JSON array.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Load a bank from a JSON file containing an array of questions.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let questions: Vec<Question> = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), count = questions.len(), "loaded question bank");
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_correct() {
        let q = Question {
            id: "q1".into(),
            grade: 9,
            difficulty: 2,
            topic: "functions".into(),
            prompt: "f(2)?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct: 2,
        };
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_prompt_and_options_are_optional() {
        let q: Question = serde_json::from_str(
            r#"{"id":"q","grade":7,"difficulty":1,"topic":"fractions","correct":0}"#,
        )
        .unwrap();
        assert!(q.prompt.is_empty());
        assert!(q.options.is_empty());
    }

    #[tokio::test]
    async fn test_load_bank_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(
            &path,
            r#"[
                {"id":"a","grade":9,"difficulty":3,"topic":"logs","question":"log2 8?","options":["2","3"],"correct":1},
                {"id":"b","grade":9,"difficulty":2,"topic":"trig","correct":0}
            ]"#,
        )
        .unwrap();

        let bank = QuestionBank::load(&path).await.unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[0].prompt, "log2 8?");
    }

    #[tokio::test]
    async fn test_load_bank_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(QuestionBank::load(&path).await.is_err());
    }
}

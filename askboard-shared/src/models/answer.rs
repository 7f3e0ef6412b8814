/// Answer model
///
/// Answers live inside their question's `answers` list. `question_id` is a
/// plain back reference resolved by lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::AuthorSnapshot;

/// An answer to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Unique answer ID (UUID v4)
    pub id: Uuid,

    /// Body as an HTML string
    pub content: String,

    /// Who answered
    pub author: AuthorSnapshot,

    /// Question this answers
    pub question_id: Uuid,

    /// Sum of all votes on this answer
    pub votes: i64,

    /// Set when the question's author accepts this answer
    pub is_accepted: bool,

    /// When the answer was posted
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Creates an unaccepted answer with no votes
    pub fn new(question_id: Uuid, author: AuthorSnapshot, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            author,
            question_id,
            votes: 0,
            is_accepted: false,
            created_at: Utc::now(),
        }
    }
}

/// Input for answering a question
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAnswer {
    /// HTML body; whitespace-only content is rejected
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answer_rejected() {
        let blank = CreateAnswer {
            content: " \n ".to_string(),
        };
        assert!(blank.validate().is_err());

        let ok = CreateAnswer {
            content: "Try X".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}

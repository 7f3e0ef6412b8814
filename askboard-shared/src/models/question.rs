/// Question model and list queries
///
/// A question owns its answers (kept in posting order). Only the question's
/// author may accept an answer, and only once: `accepted_answer_id` is set
/// a single time and never replaced.
///
/// # Example
///
/// ```
/// use askboard_shared::models::question::{QuestionQuery, QuestionSort, QuestionFilter};
///
/// let query = QuestionQuery {
///     sort: QuestionSort::Votes,
///     filter: QuestionFilter::Unanswered,
///     search: Some("tokio".to_string()),
///     tags: vec!["rust".to_string()],
/// };
/// assert_eq!(query.sort, QuestionSort::Votes);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::answer::Answer;
use super::user::AuthorSnapshot;

/// Maximum number of tags on a question
pub const MAX_TAGS: usize = 5;

/// A forum question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question ID (UUID v4)
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Body as an HTML string
    pub description: String,

    /// Normalized tags (lower-case, unique, in the order given)
    pub tags: Vec<String>,

    /// Who asked
    pub author: AuthorSnapshot,

    /// Sum of all votes on this question
    pub votes: i64,

    /// Times the question was opened
    pub views: u64,

    /// When the question was asked
    pub created_at: DateTime<Utc>,

    /// Answers in posting order
    pub answers: Vec<Answer>,

    /// The accepted answer, once chosen
    pub accepted_answer_id: Option<Uuid>,
}

impl Question {
    /// Returns true if `user_id` asked this question
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author.id == user_id
    }

    /// Looks up one of this question's answers
    pub fn answer(&self, answer_id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    pub fn is_answered(&self) -> bool {
        !self.answers.is_empty()
    }

    pub fn has_accepted_answer(&self) -> bool {
        self.accepted_answer_id.is_some()
    }

    /// Case-insensitive match against title, description and tags
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.contains(&needle))
    }
}

/// Input for asking a new question
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestion {
    /// Title
    #[validate(
        length(max = 200, message = "Title must be at most 200 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub title: String,

    /// HTML body
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub description: String,

    /// Tags; normalized on insert, at most `MAX_TAGS` after normalization
    #[serde(default)]
    #[validate(custom(function = "crate::validation::tag_shape"))]
    pub tags: Vec<String>,
}

/// Home page ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSort {
    /// Most recent first
    #[default]
    Newest,

    /// Highest vote total first
    Votes,

    /// Most viewed first
    Views,
}

/// Home page filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionFilter {
    #[default]
    All,

    /// At least one answer
    Answered,

    /// No answers yet
    Unanswered,

    /// Has an accepted answer
    Accepted,
}

impl QuestionFilter {
    pub fn admits(&self, question: &Question) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Answered => question.is_answered(),
            QuestionFilter::Unanswered => !question.is_answered(),
            QuestionFilter::Accepted => question.has_accepted_answer(),
        }
    }
}

/// Parameters for listing questions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionQuery {
    #[serde(default)]
    pub sort: QuestionSort,

    #[serde(default)]
    pub filter: QuestionFilter,

    /// Free-text search
    #[serde(default)]
    pub search: Option<String>,

    /// Every listed tag must be present
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuestionQuery {
    /// Returns true if the question passes the filter, search and tag constraints
    pub fn admits(&self, question: &Question) -> bool {
        if !self.filter.admits(question) {
            return false;
        }
        if let Some(search) = &self.search {
            if !question.matches_search(search) {
                return false;
            }
        }
        self.tags.iter().all(|wanted| {
            let wanted = wanted.trim().to_lowercase();
            wanted.is_empty() || question.tags.iter().any(|t| *t == wanted)
        })
    }

    /// Orders questions in place; ties keep newest first
    pub fn sort(&self, questions: &mut [Question]) {
        match self.sort {
            QuestionSort::Newest => questions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            QuestionSort::Votes => questions.sort_by(|a, b| {
                b.votes
                    .cmp(&a.votes)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
            QuestionSort::Views => questions.sort_by(|a, b| {
                b.views
                    .cmp(&a.views)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{User, UserRole};
    use chrono::Duration;

    fn question(title: &str, tags: &[&str], votes: i64, views: u64, age_mins: i64) -> Question {
        let author = User::new("john_doe", UserRole::User);
        Question {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "<p>body</p>".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author: AuthorSnapshot::from(&author),
            votes,
            views,
            created_at: Utc::now() - Duration::minutes(age_mins),
            answers: Vec::new(),
            accepted_answer_id: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let q = question("How do I use Tokio?", &["rust"], 0, 0, 0);
        assert!(q.matches_search("tokio"));
        assert!(q.matches_search("RUST"));
        assert!(q.matches_search("  "));
        assert!(!q.matches_search("python"));
    }

    #[test]
    fn test_tag_filter_requires_all_tags() {
        let q = question("t", &["rust", "async"], 0, 0, 0);
        let query = QuestionQuery {
            tags: vec!["Rust".to_string(), "async".to_string()],
            ..Default::default()
        };
        assert!(query.admits(&q));

        let query = QuestionQuery {
            tags: vec!["rust".to_string(), "web".to_string()],
            ..Default::default()
        };
        assert!(!query.admits(&q));
    }

    #[test]
    fn test_sort_orders() {
        let mut qs = vec![
            question("old-popular", &[], 10, 1, 30),
            question("new", &[], 0, 5, 1),
            question("mid-viewed", &[], 3, 50, 10),
        ];

        QuestionQuery::default().sort(&mut qs);
        assert_eq!(qs[0].title, "new");

        let by_votes = QuestionQuery {
            sort: QuestionSort::Votes,
            ..Default::default()
        };
        by_votes.sort(&mut qs);
        assert_eq!(qs[0].title, "old-popular");

        let by_views = QuestionQuery {
            sort: QuestionSort::Views,
            ..Default::default()
        };
        by_views.sort(&mut qs);
        assert_eq!(qs[0].title, "mid-viewed");
    }

    #[test]
    fn test_create_question_validation() {
        let ok = CreateQuestion {
            title: "How?".to_string(),
            description: "<p>Like this</p>".to_string(),
            tags: vec!["rust".to_string()],
        };
        assert!(ok.validate().is_ok());

        let blank = CreateQuestion {
            title: "   ".to_string(),
            description: "<p>x</p>".to_string(),
            tags: vec![],
        };
        assert!(blank.validate().is_err());

        let too_many_tags = CreateQuestion {
            title: "t".to_string(),
            description: "d".to_string(),
            tags: (0..6).map(|i| format!("tag{}", i)).collect(),
        };
        assert!(too_many_tags.validate().is_err());
    }
}

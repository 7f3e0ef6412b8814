/// Comment threads
///
/// Comments hang off a question or an answer and nest exactly one level:
/// a top-level comment carries a flat list of replies, and a reply cannot
/// be replied to. Replies point at their parent through `parent_id`.
///
/// ```text
/// target (question | answer)
///   ├── comment
///   │     ├── reply
///   │     └── reply
///   └── comment
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::user::AuthorSnapshot;
use super::vote::Target;

/// A comment or a reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment ID (UUID v4)
    pub id: Uuid,

    /// Record this thread belongs to
    pub target: Target,

    /// Plain text body
    pub content: String,

    /// Who wrote it
    pub author: AuthorSnapshot,

    /// When it was written
    pub created_at: DateTime<Utc>,

    /// Like counter
    pub likes: u64,

    /// Replies in posting order (always empty on a reply)
    pub replies: Vec<Comment>,

    /// Parent comment, for replies
    pub parent_id: Option<Uuid>,
}

impl Comment {
    pub fn new(
        target: Target,
        author: AuthorSnapshot,
        content: String,
        parent_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            content,
            author,
            created_at: Utc::now(),
            likes: 0,
            replies: Vec::new(),
            parent_id,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Number of comments in this thread, including this one
    pub fn thread_len(&self) -> usize {
        1 + self.replies.len()
    }
}

/// Input for commenting or replying
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(
        length(max = 2000, message = "Comments must be at most 2000 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub content: String,

    /// Set to reply to a top-level comment
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Finds a comment (top-level or reply) by ID within a list of threads
pub fn find_in_threads(threads: &[Comment], id: Uuid) -> Option<&Comment> {
    threads.iter().find_map(|c| {
        if c.id == id {
            Some(c)
        } else {
            c.replies.iter().find(|r| r.id == id)
        }
    })
}

/// Mutable variant of [`find_in_threads`]
pub fn find_in_threads_mut(threads: &mut [Comment], id: Uuid) -> Option<&mut Comment> {
    for comment in threads.iter_mut() {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(reply) = comment.replies.iter_mut().find(|r| r.id == id) {
            return Some(reply);
        }
    }
    None
}

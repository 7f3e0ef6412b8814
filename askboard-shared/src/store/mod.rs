/// Forum data store
///
/// This module defines the [`DataStore`] interface through which every
/// caller reads and mutates forum state, and the [`InMemoryStore`]
/// implementation. Callers receive the store by injection (the API keeps
/// one in its `AppState`); there is no global instance.
///
/// # Semantics
///
/// - All operations are synchronous in-memory mutations; nothing persists.
/// - Mutations take the acting user as `Option<&User>`. `None` means nobody
///   is logged in and the operation fails with
///   `StoreError::Unauthorized(AuthzError::NotAuthenticated)`.
/// - A failed operation never leaves partial changes behind.
///
/// # Example
///
/// ```
/// use askboard_shared::models::answer::CreateAnswer;
/// use askboard_shared::models::question::CreateQuestion;
/// use askboard_shared::models::user::{CreateUser, UserRole};
/// use askboard_shared::store::{DataStore, InMemoryStore};
///
/// let mut store = InMemoryStore::new();
/// let asker = store
///     .create_user(CreateUser { username: "john_doe".into(), role: UserRole::User })
///     .unwrap();
/// let helper = store
///     .create_user(CreateUser { username: "jane_smith".into(), role: UserRole::User })
///     .unwrap();
///
/// let question = store
///     .add_question(Some(&asker), CreateQuestion {
///         title: "How do I share state in axum?".into(),
///         description: "<p>...</p>".into(),
///         tags: vec!["rust".into()],
///     })
///     .unwrap();
///
/// let answer = store
///     .add_answer(Some(&helper), question.id, CreateAnswer { content: "Try X".into() })
///     .unwrap();
/// assert!(!answer.is_accepted);
///
/// store.accept_answer(Some(&asker), question.id, answer.id).unwrap();
/// let question = store.get_question(question.id).unwrap();
/// assert_eq!(question.accepted_answer_id, Some(answer.id));
/// ```

mod memory;

pub use memory::InMemoryStore;

use uuid::Uuid;
use validator::ValidationErrors;

use crate::auth::authorization::AuthzError;
use crate::models::answer::{Answer, CreateAnswer};
use crate::models::comment::{Comment, CreateComment};
use crate::models::notification::Notification;
use crate::models::question::{CreateQuestion, Question, QuestionQuery};
use crate::models::user::{Ban, CreateUser, User};
use crate::models::vote::{Target, VoteOutcome, VoteValue};

/// Error type for data store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Actor missing, banned, or lacking permission
    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    /// Input failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    /// The question already has an accepted answer
    #[error("Question {0} already has an accepted answer")]
    AlreadyAccepted(Uuid),

    /// Username is taken
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    /// Replies cannot be replied to
    #[error("Comment {0} is a reply; replies cannot be nested further")]
    NestingTooDeep(Uuid),

    /// Rejected moderation action (e.g. banning yourself)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        StoreError::NotFound { kind, id }
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Interface to forum state
///
/// Reads return owned copies so implementations are free to keep their
/// records however they like.
pub trait DataStore: Send + Sync {
    // --- users ---

    /// Registers a new account after validating `input`
    fn create_user(&mut self, input: CreateUser) -> StoreResult<User>;

    /// Inserts a fully formed user record (used by seeding)
    fn insert_user(&mut self, user: User) -> StoreResult<User>;

    fn find_user(&self, id: Uuid) -> Option<User>;

    /// Case-insensitive username lookup
    fn find_user_by_username(&self, username: &str) -> Option<User>;

    /// All users, oldest first
    fn users(&self) -> Vec<User>;

    /// Marks a user as banned and records the ban
    fn record_ban(&mut self, ban: Ban) -> StoreResult<Ban>;

    fn bans(&self) -> Vec<Ban>;

    // --- questions and answers ---

    /// Questions passing `query`, in the order it asks for
    fn list_questions(&self, query: &QuestionQuery) -> Vec<Question>;

    fn get_question(&self, id: Uuid) -> Option<Question>;

    /// Increments the view counter
    fn record_view(&mut self, id: Uuid) -> StoreResult<Question>;

    fn add_question(&mut self, actor: Option<&User>, input: CreateQuestion)
        -> StoreResult<Question>;

    /// Removes a question with its answers, votes, comments and the
    /// notifications that point at it
    fn delete_question(&mut self, id: Uuid) -> StoreResult<Question>;

    /// Appends an answer; blank content is rejected
    fn add_answer(
        &mut self,
        actor: Option<&User>,
        question_id: Uuid,
        input: CreateAnswer,
    ) -> StoreResult<Answer>;

    /// Marks an answer as the accepted one
    ///
    /// Only the question's author may accept, and only while no answer is
    /// accepted yet.
    fn accept_answer(
        &mut self,
        actor: Option<&User>,
        question_id: Uuid,
        answer_id: Uuid,
    ) -> StoreResult<Answer>;

    // --- votes ---

    /// Casts, replaces or withdraws the actor's vote on `target`
    fn vote(
        &mut self,
        actor: Option<&User>,
        target: Target,
        value: VoteValue,
    ) -> StoreResult<VoteOutcome>;

    /// The user's current vote on `target`, if any
    fn get_user_vote(&self, user_id: Uuid, target: Target) -> Option<VoteValue>;

    // --- comments ---

    /// Comment threads on `target`, oldest first
    fn comments(&self, target: Target) -> StoreResult<Vec<Comment>>;

    fn add_comment(
        &mut self,
        actor: Option<&User>,
        target: Target,
        input: CreateComment,
    ) -> StoreResult<Comment>;

    fn like_comment(&mut self, actor: Option<&User>, comment_id: Uuid) -> StoreResult<Comment>;

    // --- notifications ---

    /// Queues a notification for its recipient
    fn notify(&mut self, notification: Notification);

    /// The user's notifications, newest first
    fn notifications(&self, user_id: Uuid) -> Vec<Notification>;

    fn unread_notification_count(&self, user_id: Uuid) -> usize;

    /// Marks all of the user's notifications read, returning how many changed
    fn mark_notifications_read(&mut self, user_id: Uuid) -> usize;
}

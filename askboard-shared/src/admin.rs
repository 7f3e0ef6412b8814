/// Admin dashboard and moderation
///
/// Statistics are computed from the data store on demand. Moderation
/// actions require the admin role and operate through the same
/// [`DataStore`] interface as everything else.
///
/// # Example
///
/// ```
/// use askboard_shared::admin::AdminStats;
/// use askboard_shared::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let stats = AdminStats::collect(&store);
/// assert_eq!(stats.total_questions, 0);
/// ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::authorization::{require_role, require_user, AuthzError};
use crate::auth::session::SessionStore;
use crate::models::notification::{Notification, NotificationKind};
use crate::models::question::{Question, QuestionQuery};
use crate::models::user::{Ban, User, UserRole};
use crate::store::{DataStore, StoreError, StoreResult};

/// Dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_questions: usize,
    pub total_answers: usize,

    /// Questions with at least one answer
    pub answered_questions: usize,

    /// Questions with no answers
    pub unanswered_questions: usize,

    /// Questions with an accepted answer
    pub accepted_questions: usize,

    pub total_users: usize,
    pub banned_users: usize,
}

impl AdminStats {
    /// Computes counters from the store's current contents
    pub fn collect(store: &dyn DataStore) -> Self {
        let questions = store.list_questions(&QuestionQuery::default());
        let users = store.users();

        let answered_questions = questions.iter().filter(|q| q.is_answered()).count();

        Self {
            total_questions: questions.len(),
            total_answers: questions.iter().map(|q| q.answers.len()).sum(),
            answered_questions,
            unanswered_questions: questions.len() - answered_questions,
            accepted_questions: questions.iter().filter(|q| q.has_accepted_answer()).count(),
            total_users: users.len(),
            banned_users: users.iter().filter(|u| u.banned).count(),
        }
    }
}

/// Input for banning a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BanRequest {
    pub user_id: Uuid,

    #[validate(
        length(max = 500, message = "Reason must be at most 500 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub reason: String,
}

/// Input for a site-wide announcement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Announcement {
    #[validate(
        length(max = 1000, message = "Announcement must be at most 1000 characters"),
        custom(function = "crate::validation::not_blank")
    )]
    pub message: String,
}

/// Resolves the actor against the store and checks the admin role
fn require_admin(store: &dyn DataStore, actor: Option<&User>) -> StoreResult<User> {
    let claimed = actor.ok_or(AuthzError::NotAuthenticated)?;
    let stored = store
        .find_user(claimed.id)
        .ok_or(AuthzError::NotAuthenticated)?;
    require_user(Some(&stored))?;
    require_role(&stored, UserRole::Admin)?;
    Ok(stored)
}

/// Bans a user and ends their sessions
///
/// # Errors
///
/// - `StoreError::Unauthorized` if the actor is not an admin
/// - `StoreError::Validation` if the reason is blank
/// - `StoreError::InvalidOperation` when banning yourself or an already
///   banned user
/// - `StoreError::NotFound` if the user does not exist
pub fn ban_user(
    store: &mut dyn DataStore,
    sessions: &mut SessionStore,
    actor: Option<&User>,
    request: BanRequest,
) -> StoreResult<Ban> {
    let admin = require_admin(store, actor)?;
    request.validate()?;

    if request.user_id == admin.id {
        return Err(StoreError::InvalidOperation(
            "admins cannot ban themselves".to_string(),
        ));
    }

    let ban = store.record_ban(Ban {
        user_id: request.user_id,
        reason: request.reason.trim().to_string(),
        banned_by: admin.id,
        created_at: Utc::now(),
    })?;

    let revoked = sessions.revoke_user(ban.user_id);
    tracing::info!(user_id = %ban.user_id, revoked, "banned user's sessions revoked");

    Ok(ban)
}

/// Sends an announcement to every user except the sender and banned users
///
/// Returns the number of recipients.
pub fn send_announcement(
    store: &mut dyn DataStore,
    actor: Option<&User>,
    announcement: Announcement,
) -> StoreResult<usize> {
    let admin = require_admin(store, actor)?;
    announcement.validate()?;

    let message = announcement.message.trim().to_string();
    let recipients: Vec<Uuid> = store
        .users()
        .into_iter()
        .filter(|u| u.id != admin.id && !u.banned)
        .map(|u| u.id)
        .collect();

    for user_id in &recipients {
        store.notify(Notification::new(
            *user_id,
            NotificationKind::Announcement,
            message.clone(),
            None,
        ));
    }

    tracing::info!(sender = %admin.id, recipients = recipients.len(), "announcement sent");
    Ok(recipients.len())
}

/// Removes a question (spam cleanup)
pub fn delete_question(
    store: &mut dyn DataStore,
    actor: Option<&User>,
    question_id: Uuid,
) -> StoreResult<Question> {
    let admin = require_admin(store, actor)?;
    let question = store.delete_question(question_id)?;
    tracing::info!(question_id = %question_id, moderator = %admin.id, "question removed by moderator");
    Ok(question)
}

/// Collections the admin panel can export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Questions,
    Users,
}

/// Full dump of one collection, serialized as `{"kind": ..., "records": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "records", rename_all = "lowercase")]
pub enum DataExport {
    /// Every question with its answers, newest first
    Questions(Vec<Question>),

    /// Every account, oldest first
    Users(Vec<User>),
}

/// Exports the questions or users collection
pub fn export(
    store: &dyn DataStore,
    actor: Option<&User>,
    kind: ExportKind,
) -> StoreResult<DataExport> {
    let admin = require_admin(store, actor)?;

    let (export, records) = match kind {
        ExportKind::Questions => {
            let questions = store.list_questions(&QuestionQuery::default());
            let records = questions.len();
            (DataExport::Questions(questions), records)
        }
        ExportKind::Users => {
            let users = store.users();
            let records = users.len();
            (DataExport::Users(users), records)
        }
    };

    tracing::info!(moderator = %admin.id, kind = ?kind, records, "data exported");
    Ok(export)
}

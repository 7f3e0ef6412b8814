/// Notification model
///
/// Notifications are created by the data store as side effects:
/// a new answer notifies the question's author, an accepted answer notifies
/// the answer's author, and an announcement notifies every other user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered the notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone answered your question
    Answer,

    /// Your answer was accepted
    Accepted,

    /// Site-wide message from an admin
    Announcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,

    /// Recipient
    pub user_id: Uuid,

    pub kind: NotificationKind,

    pub message: String,

    /// Related question, if any
    pub question_id: Option<Uuid>,

    pub read: bool,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        message: impl Into<String>,
        question_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            message: message.into(),
            question_id,
            read: false,
            created_at: Utc::now(),
        }
    }
}

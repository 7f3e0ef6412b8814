/// User model
///
/// Users are created by registration (or by the mock seed data) and live
/// only as long as the process. Reputation is display-only.
///
/// # Roles
///
/// - **user**: Ask, answer, vote and comment
/// - **admin**: Everything a user can do, plus the admin panel
///
/// # Example
///
/// ```
/// use askboard_shared::models::user::{User, UserRole};
///
/// let admin = User::new("admin", UserRole::Admin);
/// assert!(admin.role.is_admin());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Reputation assigned to freshly registered accounts
pub const INITIAL_REPUTATION: i64 = 1;

/// Forum roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular member
    User,

    /// Moderator with access to the admin panel
    Admin,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Returns true for the admin role
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

/// A forum account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Unique display name, used for mock login
    pub username: String,

    /// Display-only score
    pub reputation: i64,

    /// Role
    pub role: UserRole,

    /// Set by moderation; banned users cannot log in
    #[serde(default)]
    pub banned: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with a fresh ID and the initial reputation
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            reputation: INITIAL_REPUTATION,
            role,
            banned: false,
            created_at: Utc::now(),
        }
    }

    /// Overrides reputation (used by seed data)
    pub fn with_reputation(mut self, reputation: i64) -> Self {
        self.reputation = reputation;
        self
    }
}

/// Author details copied onto questions, answers and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    /// Author's user ID
    pub id: Uuid,

    /// Username at the time of writing
    pub username: String,

    /// Reputation at the time of writing
    pub reputation: i64,
}

impl From<&User> for AuthorSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            reputation: user.reputation,
        }
    }
}

/// Moderation record for a banned user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ban {
    /// Banned user
    pub user_id: Uuid,

    /// Reason given by the moderator
    pub reason: String,

    /// Moderator who issued the ban
    pub banned_by: Uuid,

    /// When the ban was issued
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Username (3-32 characters, letters, digits and underscores)
    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "crate::validation::username_chars")
    )]
    pub username: String,

    /// Role to assign (defaults to User)
    #[serde(default)]
    pub role: UserRole,
}

/// Session store
///
/// Holds the logged-in user for each bearer token. Login is mock matching:
/// any registered, non-banned username logs in without a credential check.
/// Logout removes the session and nothing else.
///
/// # Token Format
///
/// ```text
/// ask_<32 hex chars>
/// ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::{CreateUser, User};
use crate::store::{DataStore, StoreError};

/// Prefix on every session token
pub const TOKEN_PREFIX: &str = "ask_";

/// Error type for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No account with that username
    #[error("Unknown username")]
    UnknownUser,

    /// The account is banned
    #[error("Account is banned")]
    Banned,

    /// Registration failed in the data store
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token
    pub token: String,

    /// Logged-in user
    pub user_id: Uuid,

    /// When the session was opened
    pub created_at: DateTime<Utc>,
}

impl Session {
    fn open(user_id: Uuid) -> Self {
        Self {
            token: format!("{}{}", TOKEN_PREFIX, Uuid::new_v4().simple()),
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// In-memory token → session map
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account and logs it in
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if validation fails or the username is
    /// taken.
    pub fn register(
        &mut self,
        store: &mut dyn DataStore,
        input: CreateUser,
    ) -> Result<Session, SessionError> {
        let user = store.create_user(input)?;
        Ok(self.start(user.id))
    }

    /// Logs in by username
    ///
    /// # Errors
    ///
    /// - `SessionError::UnknownUser` if no account matches
    /// - `SessionError::Banned` if the account is banned
    pub fn login(&mut self, store: &dyn DataStore, username: &str) -> Result<Session, SessionError> {
        let user = store
            .find_user_by_username(username)
            .ok_or(SessionError::UnknownUser)?;

        if user.banned {
            tracing::debug!(user_id = %user.id, "login refused for banned user");
            return Err(SessionError::Banned);
        }

        Ok(self.start(user.id))
    }

    fn start(&mut self, user_id: Uuid) -> Session {
        let session = Session::open(user_id);
        tracing::info!(user_id = %user_id, "session started");
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Ends a session; returns false if the token was unknown
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(session) => {
                tracing::info!(user_id = %session.user_id, "session ended");
                true
            }
            None => false,
        }
    }

    /// Resolves a token to the current user record
    ///
    /// Returns `None` for unknown tokens and for users that have since been
    /// removed or banned.
    pub fn current_user(&self, store: &dyn DataStore, token: &str) -> Option<User> {
        let session = self.sessions.get(token)?;
        store.find_user(session.user_id).filter(|u| !u.banned)
    }

    /// Ends every session of a user, returning how many were removed
    pub fn revoke_user(&mut self, user_id: Uuid) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.user_id != user_id);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::store::InMemoryStore;

    fn create(store: &mut InMemoryStore, username: &str) -> User {
        store
            .create_user(CreateUser {
                username: username.into(),
                role: UserRole::User,
            })
            .unwrap()
    }

    #[test]
    fn test_login_matches_username() {
        let mut store = InMemoryStore::new();
        let user = create(&mut store, "john_doe");
        let mut sessions = SessionStore::new();

        let session = sessions.login(&store, "John_Doe").unwrap();
        assert!(session.token.starts_with(TOKEN_PREFIX));
        assert_eq!(session.user_id, user.id);
        assert_eq!(sessions.current_user(&store, &session.token).unwrap().id, user.id);

        assert!(matches!(
            sessions.login(&store, "nobody"),
            Err(SessionError::UnknownUser)
        ));
    }

    #[test]
    fn test_logout_clears_only_that_session() {
        let mut store = InMemoryStore::new();
        create(&mut store, "john_doe");
        let mut sessions = SessionStore::new();

        let a = sessions.login(&store, "john_doe").unwrap();
        let b = sessions.login(&store, "john_doe").unwrap();
        assert_ne!(a.token, b.token);

        assert!(sessions.logout(&a.token));
        assert!(!sessions.logout(&a.token));
        assert!(sessions.current_user(&store, &a.token).is_none());
        assert!(sessions.current_user(&store, &b.token).is_some());
        assert_eq!(store.users().len(), 1);
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut store = InMemoryStore::new();
        let mut sessions = SessionStore::new();
        let input = CreateUser {
            username: "jane_smith".into(),
            role: UserRole::User,
        };

        assert!(sessions.register(&mut store, input.clone()).is_ok());
        assert!(matches!(
            sessions.register(&mut store, input),
            Err(SessionError::Store(StoreError::DuplicateUsername(_)))
        ));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_revoke_user() {
        let mut store = InMemoryStore::new();
        let user = create(&mut store, "john_doe");
        create(&mut store, "jane_smith");
        let mut sessions = SessionStore::new();

        sessions.login(&store, "john_doe").unwrap();
        sessions.login(&store, "john_doe").unwrap();
        sessions.login(&store, "jane_smith").unwrap();

        assert_eq!(sessions.revoke_user(user.id), 2);
        assert_eq!(sessions.len(), 1);
    }
}

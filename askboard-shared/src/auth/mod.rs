/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`session`]: Mock login/logout and bearer session tokens
/// - [`authorization`]: Role and ownership checks
///
/// Login is mock matching on username; there is no credential
/// verification. Sessions exist only in memory.
///
/// # Example
///
/// ```
/// use askboard_shared::auth::session::SessionStore;
/// use askboard_shared::models::user::{CreateUser, UserRole};
/// use askboard_shared::store::{DataStore, InMemoryStore};
///
/// let mut store = InMemoryStore::new();
/// let mut sessions = SessionStore::new();
///
/// let session = sessions
///     .register(&mut store, CreateUser { username: "jane_smith".into(), role: UserRole::User })
///     .unwrap();
/// assert!(sessions.current_user(&store, &session.token).is_some());
///
/// sessions.logout(&session.token);
/// assert!(sessions.current_user(&store, &session.token).is_none());
/// ```

pub mod authorization;
pub mod session;

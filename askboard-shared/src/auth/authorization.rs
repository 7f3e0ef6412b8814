/// Authorization helpers and permission checks
///
/// This module provides the role and ownership checks used by the data
/// store and the admin tooling.
///
/// # Permission Model
///
/// 1. **Authenticated**: Mutations require a logged-in, non-banned user
/// 2. **Role-Based Permissions**: Defined by `UserRole` (User, Admin)
/// 3. **Ownership**: Only a question's author may accept an answer
///
/// # Example
///
/// ```
/// use askboard_shared::auth::authorization::{require_user, require_role};
/// use askboard_shared::models::user::{User, UserRole};
///
/// let admin = User::new("admin", UserRole::Admin);
/// let actor = require_user(Some(&admin)).unwrap();
/// assert!(require_role(actor, UserRole::Admin).is_ok());
///
/// assert!(require_user(None).is_err());
/// ```

use uuid::Uuid;

use crate::models::question::Question;
use crate::models::user::{User, UserRole};

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// No user is logged in
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The user has been banned
    #[error("User {0} is banned")]
    Banned(Uuid),

    /// User doesn't have required role
    #[error("Insufficient permissions: requires {required:?}, has {actual:?}")]
    InsufficientRole {
        required: UserRole,
        actual: UserRole,
    },

    /// User doesn't own the resource
    #[error("Only the author of this question may do that")]
    NotOwner,
}

/// Checks that a user is present and not banned
///
/// # Errors
///
/// - `AuthzError::NotAuthenticated` if `actor` is `None`
/// - `AuthzError::Banned` if the user is banned
pub fn require_user(actor: Option<&User>) -> Result<&User, AuthzError> {
    let user = actor.ok_or(AuthzError::NotAuthenticated)?;
    if user.banned {
        return Err(AuthzError::Banned(user.id));
    }
    Ok(user)
}

/// Checks if a user has a specific role
pub fn require_role(user: &User, required: UserRole) -> Result<(), AuthzError> {
    let allowed = match required {
        UserRole::User => true,
        UserRole::Admin => user.role.is_admin(),
    };

    if !allowed {
        tracing::debug!(
            user_id = %user.id,
            required = required.as_str(),
            actual = user.role.as_str(),
            "role check failed"
        );
        return Err(AuthzError::InsufficientRole {
            required,
            actual: user.role,
        });
    }

    Ok(())
}

/// Checks that `user` asked `question`
pub fn require_question_owner(user: &User, question: &Question) -> Result<(), AuthzError> {
    if !question.is_owned_by(user.id) {
        return Err(AuthzError::NotOwner);
    }
    Ok(())
}

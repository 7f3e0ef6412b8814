/// Forum data models
///
/// This module contains the records held by the data store.
///
/// # Models
///
/// - `user`: Accounts and roles
/// - `question`: Questions plus list queries (sort, filter, search)
/// - `answer`: Answers attached to a question
/// - `comment`: Comment threads on questions and answers
/// - `vote`: Per-user votes on questions and answers
/// - `notification`: Per-user notifications
///
/// # Example
///
/// ```
/// use askboard_shared::models::user::{User, UserRole};
///
/// let user = User::new("jane_smith", UserRole::User);
/// assert_eq!(user.reputation, 1);
/// assert!(!user.role.is_admin());
/// ```

pub mod answer;
pub mod comment;
pub mod notification;
pub mod question;
pub mod user;
pub mod vote;

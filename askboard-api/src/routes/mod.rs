/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login and sessions
/// - `questions`: Question list, detail, asking, answering and accepting
/// - `votes`: Up/down votes on questions and answers
/// - `comments`: Comment threads and likes
/// - `notifications`: Per-user notification inbox
/// - `admin`: Admin panel stats and moderation

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod notifications;
pub mod questions;
pub mod votes;

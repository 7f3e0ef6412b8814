/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Session authentication (bearer tokens)

pub mod auth;

//! # AskBoard Shared Library
//!
//! This crate contains the domain types and in-memory state used by the
//! AskBoard API server: the forum data store, the session store, the view
//! switcher and the admin tooling.
//!
//! ## Module Organization
//!
//! - `models`: Users, questions, answers, comments, votes and notifications
//! - `store`: The `DataStore` interface and its in-memory implementation
//! - `auth`: Session handling and authorization checks
//! - `navigation`: Home / ask / question view switcher
//! - `admin`: Dashboard statistics and moderation actions
//! - `seed`: Mock sample data

pub mod admin;
pub mod auth;
pub mod models;
pub mod navigation;
pub mod seed;
pub mod store;
pub mod validation;

/// Current version of the AskBoard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Story Service Library
///
/// Content-publishing and reader-engagement backend: authors publish
/// stories, anonymous readers like and comment on them, and administrators
/// manage the catalog.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for stories, comments, likes
/// - `services`: Business logic layer (catalog + engagement)
/// - `db`: Database access layer and repositories
/// - `cache`: Cached views and the invalidation contract
/// - `session`: Anonymous session identity resolution
/// - `auth`: Admin capability gate
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{AppError, Result};

//! PoetryWorld data layer
//!
//! Content retrieval and social interactions (likes, bookmarks, moderated
//! comments) against a SQLite-backed content store, plus a generative-text
//! client over an opaque completion transport.
//!
//! Screens own a controller instance; controllers own their in-memory state
//! and perform all remote effects through an explicitly constructed store
//! handle. There are no process-wide singletons: tests construct their own
//! store, session, and transport.

pub mod ai;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod db;
pub mod errors;
pub mod models;

pub use auth::{AuthSession, AuthUser};
pub use config::Config;
pub use db::{init_database, ContentStore};
pub use errors::AppError;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for a host application.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests;

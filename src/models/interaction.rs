//! Like and bookmark join records.

use serde::{Deserialize, Serialize};

/// A like: at most one per (user, poem) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub user_id: String,
    pub poem_id: String,
    pub created_at: String,
}

/// A bookmark: at most one per (user, poem) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub poem_id: String,
    pub created_at: String,
}

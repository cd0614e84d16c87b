//! Comment model.

use serde::{Deserialize, Serialize};

/// A user comment on a poem.
///
/// Comments are created with `approved = false` and become visible in a
/// poem's thread only after an external moderation actor approves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub poem_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
    pub approved: bool,
    /// Display name joined from `user_profiles`; absent if the profile
    /// row is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

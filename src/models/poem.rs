//! Poem model and admin-side creation request.

use serde::{Deserialize, Serialize};

/// A published poem.
///
/// The three counters are maintained by the content store and are always
/// non-negative there; controllers apply optimistic local deltas, so a
/// screen's copy can transiently diverge until the next fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Author display name as printed on the poem card
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub views_count: i64,
}

/// Request body for publishing a new poem (admin tooling).
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePoemRequest {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub theme_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

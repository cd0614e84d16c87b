//! Content store exposing the table-style operations consumed by the
//! controllers: filtered/ordered/limited selects, single-row fetches, join
//! queries for saved items, and the social-interaction mutations.
//!
//! Every row is decoded into a typed model at this boundary.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Category, Comment, CreatePoemRequest, Poem, Theme, UserProfile};

/// Handle to the content store. Cheap to clone; constructed once and passed
/// into each controller.
#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== POEM OPERATIONS ====================

    /// List poems ordered by creation time descending, capped at `limit`.
    pub async fn list_poems(&self, limit: i64) -> Result<Vec<Poem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, author, category_id, theme_id, tags,
                      created_at, updated_at, likes_count, comments_count, views_count
               FROM poems ORDER BY created_at DESC LIMIT ?"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(poem_from_row).collect())
    }

    /// Get a poem by ID.
    pub async fn get_poem(&self, id: &str) -> Result<Option<Poem>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, content, author, category_id, theme_id, tags,
                      created_at, updated_at, likes_count, comments_count, views_count
               FROM poems WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(poem_from_row))
    }

    /// Publish a new poem (admin tooling).
    pub async fn create_poem(&self, request: &CreatePoemRequest) -> Result<Poem, AppError> {
        if request.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if request.content.trim().is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        if request.author.trim().is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags_json = request
            .tags
            .as_ref()
            .map(|t| serde_json::to_string(t).unwrap_or_default());

        sqlx::query(
            r#"INSERT INTO poems (
                id, title, content, author, category_id, theme_id, tags,
                created_at, updated_at, likes_count, comments_count, views_count
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.author)
        .bind(&request.category_id)
        .bind(&request.theme_id)
        .bind(&tags_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Poem {
            id,
            title: request.title.clone(),
            content: request.content.clone(),
            author: request.author.clone(),
            category_id: request.category_id.clone(),
            theme_id: request.theme_id.clone(),
            tags: request.tags.clone(),
            created_at: now.clone(),
            updated_at: now,
            likes_count: 0,
            comments_count: 0,
            views_count: 0,
        })
    }

    /// Atomically increment a poem's view count by one.
    ///
    /// Single conditional UPDATE so concurrent viewers never under-count.
    pub async fn increment_views(&self, poem_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE poems SET views_count = views_count + 1 WHERE id = ?")
            .bind(poem_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Poem {} not found", poem_id)));
        }
        Ok(())
    }

    // ==================== COMMENT OPERATIONS ====================

    /// List a poem's approved comments, newest first, with the author's
    /// display name joined from `user_profiles`.
    pub async fn approved_comments(&self, poem_id: &str) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.poem_id, c.user_id, c.content, c.created_at, c.approved,
                      p.name AS author_name
               FROM comments c
               LEFT JOIN user_profiles p ON p.id = c.user_id
               WHERE c.poem_id = ? AND c.approved = 1
               ORDER BY c.created_at DESC"#,
        )
        .bind(poem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Create a comment pending moderation. New comments are never directly
    /// visible: `approved` always starts false.
    pub async fn create_comment(
        &self,
        poem_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<Comment, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO comments (id, poem_id, user_id, content, created_at, approved)
               VALUES (?, ?, ?, ?, ?, 0)"#,
        )
        .bind(&id)
        .bind(poem_id)
        .bind(user_id)
        .bind(content)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id,
            poem_id: poem_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: now,
            approved: false,
            author_name: None,
        })
    }

    /// Approve a comment (moderation actor). The transition runs exactly
    /// once: approving an already-approved comment is a no-op, and the
    /// poem's approved-comment counter moves with the transition.
    pub async fn approve_comment(&self, comment_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT poem_id, approved FROM comments WHERE id = ?")
            .bind(comment_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", comment_id)))?;

        let approved: i64 = row.get("approved");
        if approved != 0 {
            return Ok(());
        }
        let poem_id: String = row.get("poem_id");

        sqlx::query("UPDATE comments SET approved = 1 WHERE id = ?")
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE poems SET comments_count = comments_count + 1 WHERE id = ?")
            .bind(&poem_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ==================== LIKE OPERATIONS ====================

    /// Check whether a like row exists for the (user, poem) pair.
    pub async fn like_exists(&self, user_id: &str, poem_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT id FROM likes WHERE user_id = ? AND poem_id = ?")
            .bind(user_id)
            .bind(poem_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Insert a like and bump the poem's like counter.
    pub async fn insert_like(&self, user_id: &str, poem_id: &str) -> Result<(), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO likes (id, user_id, poem_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(user_id)
            .bind(poem_id)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE poems SET likes_count = likes_count + 1 WHERE id = ?")
            .bind(poem_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete the like for a (user, poem) pair and lower the counter,
    /// clamped at zero. Deleting an absent like is a no-op.
    pub async fn delete_like(&self, user_id: &str, poem_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM likes WHERE user_id = ? AND poem_id = ?")
            .bind(user_id)
            .bind(poem_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() > 0 {
            sqlx::query(
                "UPDATE poems SET likes_count = MAX(likes_count - 1, 0) WHERE id = ?",
            )
            .bind(poem_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// List the poems a user has liked, most recently liked first.
    pub async fn liked_poems(&self, user_id: &str) -> Result<Vec<Poem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT p.id, p.title, p.content, p.author, p.category_id, p.theme_id, p.tags,
                      p.created_at, p.updated_at, p.likes_count, p.comments_count, p.views_count
               FROM likes l
               JOIN poems p ON p.id = l.poem_id
               WHERE l.user_id = ?
               ORDER BY l.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(poem_from_row).collect())
    }

    // ==================== BOOKMARK OPERATIONS ====================

    /// Check whether a bookmark row exists for the (user, poem) pair.
    pub async fn bookmark_exists(&self, user_id: &str, poem_id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT id FROM bookmarks WHERE user_id = ? AND poem_id = ?")
            .bind(user_id)
            .bind(poem_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Insert a bookmark. Poems carry no bookmark counter.
    pub async fn insert_bookmark(&self, user_id: &str, poem_id: &str) -> Result<(), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO bookmarks (id, user_id, poem_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(user_id)
            .bind(poem_id)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete the bookmark for a (user, poem) pair. Absent rows are a no-op.
    pub async fn delete_bookmark(&self, user_id: &str, poem_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM bookmarks WHERE user_id = ? AND poem_id = ?")
            .bind(user_id)
            .bind(poem_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List the poems a user has bookmarked, most recently saved first.
    pub async fn bookmarked_poems(&self, user_id: &str) -> Result<Vec<Poem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT p.id, p.title, p.content, p.author, p.category_id, p.theme_id, p.tags,
                      p.created_at, p.updated_at, p.likes_count, p.comments_count, p.views_count
               FROM bookmarks b
               JOIN poems p ON p.id = b.poem_id
               WHERE b.user_id = ?
               ORDER BY b.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(poem_from_row).collect())
    }

    // ==================== TAXONOMY OPERATIONS ====================

    /// List all categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows =
            sqlx::query("SELECT id, name, description, icon, color FROM categories ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    /// List all themes.
    pub async fn list_themes(&self) -> Result<Vec<Theme>, AppError> {
        let rows = sqlx::query("SELECT id, name, description FROM themes ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(theme_from_row).collect())
    }

    /// Create a category (admin tooling).
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<Category, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO categories (id, name, description, icon, color) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(color)
        .execute(&self.pool)
        .await?;

        Ok(Category {
            id,
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
            icon: icon.map(|s| s.to_string()),
            color: color.map(|s| s.to_string()),
        })
    }

    /// Create a theme (admin tooling).
    pub async fn create_theme(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Theme, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO themes (id, name, description) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(Theme {
            id,
            name: name.to_string(),
            description: description.map(|s| s.to_string()),
        })
    }

    // ==================== PROFILE OPERATIONS ====================

    /// Create or refresh a user's public profile.
    pub async fn upsert_user_profile(
        &self,
        user_id: &str,
        name: &str,
        avatar: Option<&str>,
    ) -> Result<UserProfile, AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO user_profiles (id, name, avatar, created_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (id) DO UPDATE SET name = excluded.name, avatar = excluded.avatar"#,
        )
        .bind(user_id)
        .bind(name)
        .bind(avatar)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get_user_profile(user_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Profile {} not found after upsert", user_id))
        })
    }

    /// Get a user's public profile.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query("SELECT id, name, avatar, created_at FROM user_profiles WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row))
    }
}

// Helper functions for row conversion

fn poem_from_row(row: &sqlx::sqlite::SqliteRow) -> Poem {
    let tags_str: Option<String> = row.get("tags");
    Poem {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        author: row.get("author"),
        category_id: row.get("category_id"),
        theme_id: row.get("theme_id"),
        tags: tags_str.map(|s| parse_json_array(&s)),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        likes_count: row.get("likes_count"),
        comments_count: row.get("comments_count"),
        views_count: row.get("views_count"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> Comment {
    let approved: i64 = row.get("approved");
    Comment {
        id: row.get("id"),
        poem_id: row.get("poem_id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        approved: approved != 0,
        author_name: row.get("author_name"),
    }
}

fn category_from_row(row: &sqlx::sqlite::SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        icon: row.get("icon"),
        color: row.get("color"),
    }
}

fn theme_from_row(row: &sqlx::sqlite::SqliteRow) -> Theme {
    Theme {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> UserProfile {
    UserProfile {
        id: row.get("id"),
        name: row.get("name"),
        avatar: row.get("avatar"),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

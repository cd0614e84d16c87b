//! Content feed controller.

use crate::auth::AuthSession;
use crate::db::ContentStore;
use crate::errors::AppError;
use crate::models::Poem;

/// Fixed feed page size.
pub const FEED_PAGE_SIZE: i64 = 20;

/// Paginated poem feed with like/bookmark actions.
pub struct FeedController {
    store: ContentStore,
    session: AuthSession,
    poems: Vec<Poem>,
}

impl FeedController {
    pub fn new(store: ContentStore, session: AuthSession) -> Self {
        Self {
            store,
            session,
            poems: Vec::new(),
        }
    }

    /// The currently loaded feed, most recent first.
    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    /// Load (or refresh) the feed: newest poems first, capped at
    /// [`FEED_PAGE_SIZE`]. The feed is replaced wholesale on success; on
    /// failure the prior feed stays untouched and the error is surfaced.
    pub async fn load_feed(&mut self) -> Result<(), AppError> {
        match self.store.list_poems(FEED_PAGE_SIZE).await {
            Ok(poems) => {
                self.poems = poems;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error loading poems: {}", e);
                Err(e)
            }
        }
    }

    /// Toggle the current user's like on a poem.
    ///
    /// Existence-check-then-toggle, matching the detail controller's
    /// contract. The local counter moves immediately; the remote write is
    /// fire-and-forget. Without a signed-in user this is a silent no-op.
    pub async fn toggle_like(&mut self, poem_id: &str) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        let had_like = match self.store.like_exists(&user.id, poem_id).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Error checking like state: {}", e);
                return;
            }
        };

        if let Some(poem) = self.poems.iter_mut().find(|p| p.id == poem_id) {
            if had_like {
                poem.likes_count = (poem.likes_count - 1).max(0);
            } else {
                poem.likes_count += 1;
            }
        }

        let result = if had_like {
            self.store.delete_like(&user.id, poem_id).await
        } else {
            self.store.insert_like(&user.id, poem_id).await
        };
        if let Err(e) = result {
            tracing::warn!("Error toggling like: {}", e);
        }
    }

    /// Toggle the current user's bookmark on a poem. No local counter moves;
    /// poems carry no bookmark count. Silent no-op without a user.
    pub async fn toggle_bookmark(&mut self, poem_id: &str) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        let had_bookmark = match self.store.bookmark_exists(&user.id, poem_id).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Error checking bookmark state: {}", e);
                return;
            }
        };

        let result = if had_bookmark {
            self.store.delete_bookmark(&user.id, poem_id).await
        } else {
            self.store.insert_bookmark(&user.id, poem_id).await
        };
        if let Err(e) = result {
            tracing::warn!("Error toggling bookmark: {}", e);
        }
    }
}

//! Poem detail controller.

use crate::auth::AuthSession;
use crate::db::ContentStore;
use crate::errors::AppError;
use crate::models::{Comment, Poem};

/// Attribution line appended to shared poems.
const SHARE_ATTRIBUTION: &str = "Shared from PoetryWorld";

/// Outcome of a comment submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    /// Stored with `approved = false`; it will appear in the thread once a
    /// moderator approves it.
    PendingModeration,
    /// Nothing to submit: empty text or nobody signed in.
    Skipped,
}

/// Per-poem view state: the poem, its approved comment thread, and the
/// current user's like/bookmark flags.
///
/// A controller is keyed by its poem id at construction; navigating to a
/// different poem means constructing a fresh controller, so a late response
/// for one poem can never overwrite another poem's state.
pub struct PoemDetailController {
    store: ContentStore,
    session: AuthSession,
    poem_id: String,
    poem: Option<Poem>,
    comments: Vec<Comment>,
    liked: bool,
    bookmarked: bool,
}

impl PoemDetailController {
    pub fn new(store: ContentStore, session: AuthSession, poem_id: impl Into<String>) -> Self {
        Self {
            store,
            session,
            poem_id: poem_id.into(),
            poem: None,
            comments: Vec::new(),
            liked: false,
            bookmarked: false,
        }
    }

    /// The loaded poem; `None` while loading or when the id is unknown.
    pub fn poem(&self) -> Option<&Poem> {
        self.poem.as_ref()
    }

    /// Approved comments, newest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Load the view: poem, approved comments, and the user's like/bookmark
    /// rows, fetched concurrently. The three results arrive in no particular
    /// order and each reconciles only its own piece of state.
    ///
    /// A successful poem fetch triggers a fire-and-forget atomic view-count
    /// increment at the store. Failures are logged and leave the affected
    /// piece of state as it was; a missing poem is an empty state, not an
    /// error.
    pub async fn load(&mut self) {
        let store = self.store.clone();
        let id = self.poem_id.clone();
        let user = self.session.current_user();

        let flags = async {
            match &user {
                Some(u) => tokio::join!(
                    store.like_exists(&u.id, &id),
                    store.bookmark_exists(&u.id, &id)
                ),
                None => (Ok(false), Ok(false)),
            }
        };

        let (poem_res, comments_res, (liked_res, bookmarked_res)) =
            tokio::join!(store.get_poem(&id), store.approved_comments(&id), flags);

        match poem_res {
            Ok(Some(poem)) => {
                self.poem = Some(poem);
                if let Err(e) = store.increment_views(&id).await {
                    tracing::warn!("Error incrementing view count: {}", e);
                }
            }
            Ok(None) => {
                tracing::warn!("Poem {} not found", id);
            }
            Err(e) => {
                tracing::error!("Error loading poem: {}", e);
            }
        }

        match comments_res {
            Ok(comments) => self.comments = comments,
            Err(e) => tracing::error!("Error loading comments: {}", e),
        }

        match liked_res {
            Ok(liked) => self.liked = liked,
            Err(e) => tracing::warn!("Error checking like state: {}", e),
        }
        match bookmarked_res {
            Ok(bookmarked) => self.bookmarked = bookmarked,
            Err(e) => tracing::warn!("Error checking bookmark state: {}", e),
        }
    }

    /// Toggle the current user's like. The `liked` flag picks the direction:
    /// delete-and-decrement when set, insert-and-increment when not. The
    /// local flag and counter move immediately; the remote write is
    /// fire-and-forget. Silent no-op without a user.
    pub async fn toggle_like(&mut self) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        let result = if self.liked {
            self.liked = false;
            if let Some(poem) = &mut self.poem {
                poem.likes_count = (poem.likes_count - 1).max(0);
            }
            self.store.delete_like(&user.id, &self.poem_id).await
        } else {
            self.liked = true;
            if let Some(poem) = &mut self.poem {
                poem.likes_count += 1;
            }
            self.store.insert_like(&user.id, &self.poem_id).await
        };
        if let Err(e) = result {
            tracing::warn!("Error toggling like: {}", e);
        }
    }

    /// Toggle the current user's bookmark, symmetric to [`toggle_like`]
    /// but without a counter.
    ///
    /// [`toggle_like`]: PoemDetailController::toggle_like
    pub async fn toggle_bookmark(&mut self) {
        let Some(user) = self.session.current_user() else {
            return;
        };

        let result = if self.bookmarked {
            self.bookmarked = false;
            self.store.delete_bookmark(&user.id, &self.poem_id).await
        } else {
            self.bookmarked = true;
            self.store.insert_bookmark(&user.id, &self.poem_id).await
        };
        if let Err(e) = result {
            tracing::warn!("Error toggling bookmark: {}", e);
        }
    }

    /// Submit a comment for moderation.
    ///
    /// Empty (after trimming) text or an absent user skips silently. The
    /// comment is stored unapproved and is deliberately not appended to the
    /// visible thread; the local comment count does not move either.
    pub async fn add_comment(&mut self, text: &str) -> Result<CommentOutcome, AppError> {
        if text.trim().is_empty() {
            return Ok(CommentOutcome::Skipped);
        }
        let Some(user) = self.session.current_user() else {
            return Ok(CommentOutcome::Skipped);
        };

        self.store
            .create_comment(&self.poem_id, &user.id, text)
            .await?;

        Ok(CommentOutcome::PendingModeration)
    }

    /// Format the poem for the OS share surface. `None` until a poem is
    /// loaded.
    pub fn share_text(&self) -> Option<String> {
        self.poem.as_ref().map(|poem| {
            format!(
                "{}\n\nby {}\n\n{}\n\n{}",
                poem.title, poem.author, poem.content, SHARE_ATTRIBUTION
            )
        })
    }
}

//! Saved items controller.

use crate::auth::AuthSession;
use crate::db::ContentStore;
use crate::models::Poem;

/// Which cached sequence the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedTab {
    Bookmarks,
    Likes,
}

/// The current user's bookmarked and liked poems, fetched through the two
/// join queries and cached independently. Switching tabs only switches
/// which cached sequence is visible; it never re-fetches.
pub struct SavedItemsController {
    store: ContentStore,
    session: AuthSession,
    bookmarked: Vec<Poem>,
    liked: Vec<Poem>,
    active_tab: SavedTab,
}

impl SavedItemsController {
    pub fn new(store: ContentStore, session: AuthSession) -> Self {
        Self {
            store,
            session,
            bookmarked: Vec::new(),
            liked: Vec::new(),
            active_tab: SavedTab::Bookmarks,
        }
    }

    /// Load both sequences for the current user. No signed-in user means
    /// two empty sequences; that is an ordinary state, not an error.
    /// Failures are logged and leave the affected sequence as it was.
    pub async fn load_saved(&mut self) {
        let Some(user) = self.session.current_user() else {
            self.bookmarked.clear();
            self.liked.clear();
            return;
        };

        let (bookmarked_res, liked_res) = tokio::join!(
            self.store.bookmarked_poems(&user.id),
            self.store.liked_poems(&user.id)
        );

        match bookmarked_res {
            Ok(poems) => self.bookmarked = poems,
            Err(e) => tracing::error!("Error loading bookmarked poems: {}", e),
        }
        match liked_res {
            Ok(poems) => self.liked = poems,
            Err(e) => tracing::error!("Error loading liked poems: {}", e),
        }
    }

    pub fn active_tab(&self) -> SavedTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: SavedTab) {
        self.active_tab = tab;
    }

    /// The sequence for the active tab.
    pub fn visible_poems(&self) -> &[Poem] {
        match self.active_tab {
            SavedTab::Bookmarks => &self.bookmarked,
            SavedTab::Likes => &self.liked,
        }
    }

    pub fn bookmarked_poems(&self) -> &[Poem] {
        &self.bookmarked
    }

    pub fn liked_poems(&self) -> &[Poem] {
        &self.liked
    }
}

//! Browse controller for the classification entities.

use crate::db::ContentStore;
use crate::models::{Category, Theme};

/// Bulk-fetched categories and themes for the explore screen. Read-only;
/// both lists are fetched concurrently and reconciled independently.
pub struct BrowseController {
    store: ContentStore,
    categories: Vec<Category>,
    themes: Vec<Theme>,
}

impl BrowseController {
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            categories: Vec::new(),
            themes: Vec::new(),
        }
    }

    /// Fetch categories and themes. Failures are logged and leave the
    /// affected list as it was.
    pub async fn load(&mut self) {
        let (categories_res, themes_res) =
            tokio::join!(self.store.list_categories(), self.store.list_themes());

        match categories_res {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::error!("Error loading categories: {}", e),
        }
        match themes_res {
            Ok(themes) => self.themes = themes,
            Err(e) => tracing::error!("Error loading themes: {}", e),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }
}

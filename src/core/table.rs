//! # Table
//!
//! A collection store paired with its page state and fetch status.
//!
//! ```text
//! Table<R>
//! ├── store: CollectionStore<R>   // full collection
//! ├── page: PageState             // current page / page size / total
//! └── load_state: LoadState       // initial fetch and reloads
//! ```
//!
//! `page.total_items` is synced from the store after every store mutation,
//! so the two never disagree outside of this module.

use log::{debug, info};

use crate::core::pagination::PageState;
use crate::core::record::Record;
use crate::core::store::{CollectionStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing fetched yet; the view shows an empty collection.
    #[default]
    NotLoaded,
    /// A full fetch is in flight. Previously loaded records stay visible.
    Loading,
    Loaded,
    /// The last full fetch failed. Shown as a standing message.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Table<R: Record> {
    store: CollectionStore<R>,
    page: PageState,
    load_state: LoadState,
}

impl<R: Record> Table<R> {
    pub fn new(page_size: usize) -> Self {
        Self {
            store: CollectionStore::new(),
            page: PageState::new(page_size),
            load_state: LoadState::NotLoaded,
        }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn store(&self) -> &CollectionStore<R> {
        &self.store
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// The records on the current page.
    pub fn visible(&self) -> &[R] {
        self.store.slice(self.page.visible_bounds())
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.store.get(id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.store.contains(id)
    }

    pub fn next_page(&mut self) -> bool {
        self.page.go_next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.page.go_previous()
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    /// Replaces the collection. The current page is kept, then clamped.
    pub fn apply_load(&mut self, records: Vec<R>) {
        self.store.load(records);
        self.sync_page();
        self.load_state = LoadState::Loaded;
        info!(
            "Loaded {} records ({} pages, on page {})",
            self.store.len(),
            self.page.page_count(),
            self.page.current_page()
        );
    }

    /// Records a failed full fetch. The store is left untouched.
    pub fn fail_load(&mut self, reason: String) {
        self.load_state = LoadState::Failed(reason);
    }

    /// Removes `id`; if that empties the current page past the first, the
    /// view steps back one page.
    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let removed = self.store.remove(id)?;
        if self.sync_page() {
            debug!(
                "Page emptied by removal of {}, now on page {}",
                id,
                self.page.current_page()
            );
        }
        Some(removed)
    }

    pub fn replace(&mut self, id: &R::Id, updated: R) -> Result<(), StoreError> {
        self.store.replace(id, updated)
    }

    /// Returns true if the current page had to move.
    fn sync_page(&mut self) -> bool {
        self.page.set_total_items(self.store.len());
        self.page.clamp()
    }
}

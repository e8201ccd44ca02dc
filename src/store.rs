//! Canonical client-side state: entity collections plus per-collection
//! loading/error flags. All mutations are synchronous and total; a failed
//! fetch records an error message and leaves the previous snapshot intact
//! (stale-but-consistent reads, never cleared to empty).

use crate::types::{AreaCatalog, Notification, Repair, User};

// ---------------------------------------------------------------------------
// Keyed entities
// ---------------------------------------------------------------------------

/// Entities addressable by a server-assigned id.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Repair {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Notification {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// One entity collection with transient fetch state.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T: Keyed> Collection<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == id)
    }

    /// Replace the whole collection and clear any stale error.
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
    }

    /// Upsert a single item by id.
    pub fn set_one(&mut self, item: T) {
        match self.items.iter_mut().find(|i| i.key() == item.key()) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Record (or clear) an error. The item snapshot is left untouched.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Apply an in-place patch to one item. Returns `true` if it existed.
    pub fn update<F: FnOnce(&mut T)>(&mut self, id: &str, patch: F) -> bool {
        match self.items.iter_mut().find(|i| i.key() == id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Slot — single-value variant for the area catalog
// ---------------------------------------------------------------------------

/// Same fetch-state discipline as `Collection`, for a single composite value.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Slot<T> {
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set(&mut self, value: T) {
        self.value = Some(value);
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

// ---------------------------------------------------------------------------
// Domain store
// ---------------------------------------------------------------------------

/// The canonical client-side read model.
///
/// Mutated only through the collections' methods, from a single logical
/// task at a time; consumers read derived views (status summaries, the
/// notification feed) off these snapshots.
#[derive(Debug, Default)]
pub struct RepairDomainStore {
    pub repairs: Collection<Repair>,
    pub notifications: Collection<Notification>,
    pub users: Collection<User>,
    pub areas: Slot<AreaCatalog>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

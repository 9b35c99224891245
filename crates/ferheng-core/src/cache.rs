use std::sync::Arc;

use ferheng_store::EntryStore;
use ferheng_types::{Entry, EntryId, ListState};

/// Local snapshot of the store's entries.
///
/// The snapshot is replaced wholesale on every refresh; the only local
/// mutation is [`EntryListCache::remove_locally`].
pub struct EntryListCache {
    store: Arc<dyn EntryStore>,
    state: ListState,
}

impl EntryListCache {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            state: ListState::Empty,
        }
    }

    /// Reload from the store. A failed fetch leaves an empty, degraded snapshot.
    pub async fn refresh(&mut self) -> &ListState {
        self.state = match self.store.list().await {
            Ok(entries) if entries.is_empty() => ListState::Empty,
            Ok(entries) => {
                tracing::debug!("Word list refreshed: {} entries", entries.len());
                ListState::Loaded(entries)
            }
            Err(e) => {
                tracing::warn!("Word list fetch failed: {}", e);
                ListState::FetchFailed(e.to_string())
            }
        };

        &self.state
    }

    /// Drop one entry without a round trip. Returns whether it was present.
    pub fn remove_locally(&mut self, id: &EntryId) -> bool {
        let ListState::Loaded(entries) = &mut self.state else {
            return false;
        };

        let before = entries.len();
        entries.retain(|e| e.id.as_ref() != Some(id));
        let removed = entries.len() != before;

        if entries.is_empty() {
            self.state = ListState::Empty;
        }

        removed
    }

    pub fn snapshot(&self) -> &[Entry] {
        self.state.entries()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.snapshot().iter().find(|e| e.id.as_ref() == Some(id))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, ListState::FetchFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeStore, values};

    fn seeded() -> Arc<FakeStore> {
        let store = FakeStore::starting_at(10);
        store.seed(Entry::with_id(EntryId::from(1), values(&[("headword", "av")])));
        store.seed(Entry::with_id(EntryId::from(2), values(&[("headword", "nan")])));
        store
    }

    #[tokio::test]
    async fn test_refresh_keeps_store_order() {
        let mut cache = EntryListCache::new(seeded());
        cache.refresh().await;

        let ids: Vec<_> = cache
            .snapshot()
            .iter()
            .map(|e| e.id.clone().unwrap())
            .collect();
        assert_eq!(ids, [EntryId::from(1), EntryId::from(2)]);
        assert!(matches!(cache.state(), ListState::Loaded(_)));
    }

    #[tokio::test]
    async fn test_empty_store_differs_from_failed_fetch() {
        let store = FakeStore::starting_at(1);
        let mut cache = EntryListCache::new(store.clone());

        assert_eq!(cache.refresh().await, &ListState::Empty);
        assert!(!cache.is_degraded());

        store.fail_list(true);
        assert!(matches!(cache.refresh().await, ListState::FetchFailed(_)));
        assert!(cache.snapshot().is_empty());
        assert!(cache.is_degraded());
    }

    #[tokio::test]
    async fn test_failed_refresh_discards_previous_snapshot() {
        let store = seeded();
        let mut cache = EntryListCache::new(store.clone());
        cache.refresh().await;
        assert_eq!(cache.snapshot().len(), 2);

        store.fail_list(true);
        cache.refresh().await;
        assert!(cache.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_remove_locally_skips_the_store() {
        let store = seeded();
        let mut cache = EntryListCache::new(store.clone());
        cache.refresh().await;

        assert!(cache.remove_locally(&EntryId::from(1)));
        assert!(!cache.remove_locally(&EntryId::from(1)));
        assert!(cache.get(&EntryId::from(1)).is_none());
        assert!(cache.get(&EntryId::from(2)).is_some());

        assert!(cache.remove_locally(&EntryId::from(2)));
        assert_eq!(cache.state(), &ListState::Empty);

        assert!(store.mutations().is_empty());
    }
}

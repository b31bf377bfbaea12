//! In-progress character draft storage.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use sheetforge_domain::{CharacterDraft, CharacterDraftId};

/// Shared handle to one draft. Every read or write of a draft goes through
/// its own lock; different drafts never contend.
pub type DraftHandle = Arc<Mutex<CharacterDraft>>;

/// Default cap on drafts held at once.
pub const DEFAULT_MAX_DRAFTS: usize = 10_000;

/// Drafts held in process memory, up to a fixed number at once.
pub struct CharacterDraftStore {
    drafts: DashMap<CharacterDraftId, DraftHandle>,
    max_drafts: usize,
}

impl Default for CharacterDraftStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_DRAFTS)
    }
}

impl CharacterDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(max_drafts: usize) -> Self {
        Self {
            drafts: DashMap::new(),
            max_drafts,
        }
    }

    pub fn max_drafts(&self) -> usize {
        self.max_drafts
    }

    /// Store a draft. Returns `None` when the store is full; callers free
    /// space by discarding drafts.
    ///
    /// The length check and the insert are not one atomic step, so
    /// concurrent inserts can overshoot the limit by a few entries.
    pub fn insert(&self, draft: CharacterDraft) -> Option<DraftHandle> {
        if self.drafts.len() >= self.max_drafts {
            return None;
        }
        let id = draft.id();
        let handle = Arc::new(Mutex::new(draft));
        self.drafts.insert(id, handle.clone());
        Some(handle)
    }

    /// Clone the handle out so the map shard is not held across an await.
    pub fn get(&self, id: CharacterDraftId) -> Option<DraftHandle> {
        self.drafts.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: CharacterDraftId) -> Option<DraftHandle> {
        self.drafts.remove(&id).map(|(_, handle)| handle)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_get_remove() {
        let store = CharacterDraftStore::new();
        let draft = CharacterDraft::new();
        let id = draft.id();

        assert!(store.insert(draft).is_some());
        assert_eq!(store.len(), 1);

        let handle = store.get(id).expect("stored");
        assert_eq!(handle.lock().await.id(), id);

        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn full_store_refuses_until_a_draft_is_removed() {
        let store = CharacterDraftStore::with_limit(2);
        let first = CharacterDraft::new();
        let first_id = first.id();
        assert!(store.insert(first).is_some());
        assert!(store.insert(CharacterDraft::new()).is_some());

        let refused = CharacterDraft::new();
        let refused_id = refused.id();
        assert!(store.insert(refused).is_none());
        assert!(store.get(refused_id).is_none());
        assert_eq!(store.len(), 2);

        store.remove(first_id);
        assert!(store.insert(CharacterDraft::new()).is_some());
        assert_eq!(store.len(), 2);
    }
}

//! Typed whole-value accessors over a [`ScopedKvStore`].

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageResult;
use crate::kv::ScopedKvStore;

/// A JSON array stored under one key.
///
/// `load` returns an empty vector when the key has never been written.
/// `save` replaces the whole array. Concurrent writers are not coordinated:
/// whichever `save` lands last is what remains.
pub struct Collection<T> {
    scope: ScopedKvStore,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("namespace", &self.scope.namespace())
            .field("key", &self.key)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    /// Bind a collection to `key` inside `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore, key: &'static str) -> Self {
        Self {
            scope,
            key,
            _marker: PhantomData,
        }
    }

    /// Key this collection is stored under.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Load every item.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails or the stored blob does not
    /// decode.
    pub async fn load(&self) -> StorageResult<Vec<T>> {
        Ok(self
            .scope
            .get_json::<Vec<T>>(self.key)
            .await?
            .unwrap_or_default())
    }

    /// Replace the stored array with `items`.
    ///
    /// # Errors
    ///
    /// Returns a storage error if encoding or the write fails.
    pub async fn save(&self, items: &[T]) -> StorageResult<()> {
        self.scope.set_json(self.key, items).await?;
        tracing::trace!(key = self.key, len = items.len(), "collection saved");
        Ok(())
    }

    /// Insert `item` at the front and persist. Returns the new length.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the load or the save fails.
    pub async fn prepend(&self, item: T) -> StorageResult<usize> {
        let mut items = self.load().await?;
        items.insert(0, item);
        self.save(&items).await?;
        Ok(items.len())
    }
}

/// A single optional JSON value stored under one key.
pub struct Slot<T> {
    scope: ScopedKvStore,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("namespace", &self.scope.namespace())
            .field("key", &self.key)
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> Slot<T> {
    /// Bind a slot to `key` inside `scope`.
    #[must_use]
    pub fn new(scope: ScopedKvStore, key: &'static str) -> Self {
        Self {
            scope,
            key,
            _marker: PhantomData,
        }
    }

    /// Current value, if set.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read fails or the value does not decode.
    pub async fn get(&self) -> StorageResult<Option<T>> {
        self.scope.get_json(self.key).await
    }

    /// Overwrite the value.
    ///
    /// # Errors
    ///
    /// Returns a storage error if encoding or the write fails.
    pub async fn set(&self, value: &T) -> StorageResult<()> {
        self.scope.set_json(self.key, value).await
    }

    /// Remove the value. Returns `true` if one was present.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the delete fails.
    pub async fn clear(&self) -> StorageResult<bool> {
        self.scope.delete(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::StorageError;
    use crate::kv::MemoryKvStore;
    use crate::layout;

    fn scope() -> ScopedKvStore {
        ScopedKvStore::new(Arc::new(MemoryKvStore::new()), layout::DEFAULT_NAMESPACE).unwrap()
    }

    #[tokio::test]
    async fn test_missing_collection_loads_empty() {
        let reports: Collection<String> = Collection::new(scope(), layout::REPORTS);
        assert!(reports.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prepend_puts_newest_first() {
        let logs: Collection<String> = Collection::new(scope(), layout::LOGS);
        assert_eq!(logs.prepend("first".into()).await.unwrap(), 1);
        assert_eq!(logs.prepend("second".into()).await.unwrap(), 2);
        assert_eq!(logs.load().await.unwrap(), vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_array() {
        let users: Collection<u32> = Collection::new(scope(), layout::USERS);
        users.save(&[1, 2, 3]).await.unwrap();
        users.save(&[9]).await.unwrap();
        assert_eq!(users.load().await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let scope = scope();
        let a: Collection<u32> = Collection::new(scope.clone(), layout::USERS);
        let b = a.clone();

        let mut seen_by_a = a.load().await.unwrap();
        let mut seen_by_b = b.load().await.unwrap();
        seen_by_a.push(1);
        seen_by_b.push(2);
        a.save(&seen_by_a).await.unwrap();
        b.save(&seen_by_b).await.unwrap();

        assert_eq!(a.load().await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_serialization_error() {
        let scope = scope();
        scope.set_json(layout::USERS, &"not an array").await.unwrap();
        let users: Collection<u32> = Collection::new(scope, layout::USERS);
        assert!(matches!(
            users.load().await,
            Err(StorageError::Serialization { .. })
        ));
    }

    #[tokio::test]
    async fn test_slot_set_get_clear() {
        let session: Slot<String> = Slot::new(scope(), layout::CURRENT_SESSION_USER);
        assert!(session.get().await.unwrap().is_none());
        assert!(!session.clear().await.unwrap());

        session.set(&"user:1".to_string()).await.unwrap();
        assert_eq!(session.get().await.unwrap().as_deref(), Some("user:1"));

        assert!(session.clear().await.unwrap());
        assert!(session.get().await.unwrap().is_none());
    }
}

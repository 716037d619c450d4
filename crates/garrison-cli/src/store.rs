//! Opening the configured store backend.

use std::sync::Arc;

use anyhow::Context;
use garrison_config::{Config, StorageBackend};
use garrison_core::dirs::GarrisonHome;
use garrison_storage::{KvStore, MemoryKvStore, SurrealKvStore};
use tracing::warn;

/// An open store, kept typed so the on-disk backend can be closed.
pub(crate) enum StoreHandle {
    Memory(Arc<MemoryKvStore>),
    Disk(Arc<SurrealKvStore>),
}

impl StoreHandle {
    /// Open the backend named in `[storage]`.
    pub(crate) fn open(cfg: &Config, home: &GarrisonHome) -> anyhow::Result<Self> {
        match cfg.storage.backend()? {
            StorageBackend::Memory => {
                warn!("memory backend selected; nothing will be persisted");
                Ok(Self::Memory(Arc::new(MemoryKvStore::new())))
            },
            StorageBackend::SurrealKv => {
                let path = match cfg.storage.path() {
                    Some(path) => path,
                    None => {
                        home.ensure()
                            .with_context(|| format!("creating {}", home.root().display()))?;
                        home.store_path()
                    },
                };
                let store = SurrealKvStore::open(&path)
                    .with_context(|| format!("opening store at {}", path.display()))?;
                Ok(Self::Disk(Arc::new(store)))
            },
        }
    }

    /// The store as a trait object.
    pub(crate) fn kv(&self) -> Arc<dyn KvStore> {
        match self {
            Self::Memory(store) => Arc::clone(store) as Arc<dyn KvStore>,
            Self::Disk(store) => Arc::clone(store) as Arc<dyn KvStore>,
        }
    }

    /// Flush and close.
    pub(crate) async fn close(self) -> anyhow::Result<()> {
        if let Self::Disk(store) = self {
            store.close().await?;
        }
        Ok(())
    }
}

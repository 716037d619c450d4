//! Shared test harness for integration tests.

use std::sync::Arc;

use garrison_access::OwnerBootstrap;
use garrison_console::{Console, ConsoleSettings};
use garrison_core::Rank;
use garrison_storage::{KvStore, MemoryKvStore};

/// Email of the seed owner every harness configures.
#[allow(dead_code)]
pub const OWNER_EMAIL: &str = "chief@x.mil";

/// Console settings with the seed owner configured.
#[allow(dead_code)]
pub fn settings() -> ConsoleSettings {
    ConsoleSettings {
        owner: Some(OwnerBootstrap::new(
            OWNER_EMAIL,
            "CHIEF",
            Rank::Colonel,
            "COMGEP",
        )),
        ..ConsoleSettings::default()
    }
}

/// A shared in-memory store that can be opened by several consoles, the
/// way successive CLI invocations share one on-disk store.
#[allow(dead_code)]
pub struct ConsoleHarness {
    /// The shared store.
    pub store: Arc<MemoryKvStore>,
}

#[allow(dead_code)]
impl ConsoleHarness {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryKvStore::new()),
        }
    }

    /// Open a console over the store, restoring any persisted session.
    pub async fn open(&self) -> Console {
        Console::open(Arc::clone(&self.store) as Arc<dyn KvStore>, settings())
            .await
            .expect("failed to open console")
    }

    /// Open a console and log in as the seed owner.
    pub async fn owner(&self) -> Console {
        let mut console = self.open().await;
        console
            .login(OWNER_EMAIL)
            .await
            .expect("owner login failed");
        console
    }
}

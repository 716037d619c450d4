//! Garrison Storage: key-value persistence for the console.
//!
//! # Tier 1: Raw Key-Value ([`KvStore`])
//!
//! Byte-level `get`/`set`/`delete` with namespaced keys. Two backends:
//!
//! - [`MemoryKvStore`]: always available, for tests and throwaway runs
//! - `SurrealKvStore`: embedded, on-disk `SurrealKV` (feature **`kv`**)
//!
//! # Tier 2: Typed collections ([`Collection`], [`Slot`])
//!
//! The console keeps every entity kind as one JSON blob under a fixed key
//! (see [`layout`]). A [`Collection`] reads and writes the whole sequence at
//! once; a [`Slot`] holds a single optional value. There is no locking
//! between a load and the following save: the last writer wins.
//!
//! # Feature Flags
//!
//! - **`kv`**: `SurrealKV` on-disk store

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod collection;
pub mod error;
pub mod kv;
pub mod layout;

pub use collection::{Collection, Slot};
pub use error::{StorageError, StorageResult};
pub use kv::{KvStore, MemoryKvStore, ScopedKvStore};

#[cfg(feature = "kv")]
pub use kv::SurrealKvStore;

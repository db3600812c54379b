//! Card catalog loading and publication.
//!
//! Cards live in independent deck partitions. A load cycle decodes every
//! partition concurrently, merges the results into one id-sorted [`Catalog`]
//! and publishes it through a [`CatalogCache`], which replays the latest value
//! to new subscribers and multicasts later values to all of them.
//!
//! ```text
//! ReloadTrigger ──> CatalogService driver ──> load_all (one task per deck)
//!                                                  │ all ok
//!                                                  v
//!                          subscribers <── CatalogCache::publish
//! ```
//!
//! A single failing partition fails the whole cycle; the cache then keeps its
//! previous value and the failure is reported through `tracing`.

pub mod cache;
pub mod card;
pub mod catalog;
pub mod config;
pub mod decode;
pub mod deck;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod service;
pub mod source;

pub use cache::{CatalogCache, CatalogSubscription};
pub use card::{BunnyRequirement, Card, CardId, CardKind};
pub use catalog::{CardRef, Catalog};
pub use config::{CatalogConfig, SourceConfig};
pub use deck::{Deck, DeckInfo};
pub use error::{ConfigError, DecodeError, LoadError};
pub use loader::{load_all, load_catalog};
pub use lookup::QueryResult;
pub use service::{CatalogService, ReloadRequest, ReloadTrigger};
pub use source::{BundledSource, DirectorySource, MemorySource, PartitionSource};

//! Byte sources for deck partitions.
//!
//! The loader only needs a reader per deck; where the bytes live is up to the
//! [`PartitionSource`] implementation.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::Deck;

/// Opens a fresh reader over one deck's encoded card list.
///
/// Implementations are shared across decode tasks and must tolerate
/// concurrent `open` calls for different decks.
pub trait PartitionSource: Send + Sync {
	fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>>;
}

impl<S: PartitionSource + ?Sized> PartitionSource for Arc<S> {
	fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>> {
		(**self).open(deck)
	}
}

/// Deck data compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl BundledSource {
	pub fn json(deck: Deck) -> &'static str {
		match deck {
			Deck::Blue => include_str!("../data/blue.json"),
			Deck::Yellow => include_str!("../data/yellow.json"),
			Deck::Red => include_str!("../data/red.json"),
			Deck::Violet => include_str!("../data/violet.json"),
			Deck::Orange => include_str!("../data/orange.json"),
			Deck::Green => include_str!("../data/green.json"),
		}
	}
}

impl PartitionSource for BundledSource {
	fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>> {
		Ok(Box::new(Cursor::new(Self::json(deck).as_bytes())))
	}
}

/// Reads `<root>/<deck-name>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
	root: PathBuf,
}

impl DirectorySource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn partition_path(&self, deck: Deck) -> PathBuf {
		self.root.join(format!("{}.json", deck.name()))
	}
}

impl PartitionSource for DirectorySource {
	fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>> {
		Ok(Box::new(File::open(self.partition_path(deck))?))
	}
}

/// In-memory partitions. Decks without an entry fail to open.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	partitions: HashMap<Deck, Arc<[u8]>>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, deck: Deck, bytes: impl Into<Vec<u8>>) -> Self {
		self.insert(deck, bytes);
		self
	}

	pub fn insert(&mut self, deck: Deck, bytes: impl Into<Vec<u8>>) {
		self.partitions.insert(deck, Arc::from(bytes.into()));
	}
}

impl PartitionSource for MemorySource {
	fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>> {
		match self.partitions.get(&deck) {
			Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
			None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no {deck} partition in memory source"))),
		}
	}
}

//! Error types for decoding, loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::{CardId, Deck};

/// A single partition could not be turned into cards.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// The partition source could not be opened.
	#[error("cannot open {deck} partition: {source}")]
	Open {
		deck: Deck,
		#[source]
		source: std::io::Error,
	},

	/// Reading the partition bytes failed midway.
	#[error("failed reading {deck} partition: {source}")]
	Read {
		deck: Deck,
		#[source]
		source: std::io::Error,
	},

	/// The bytes are not a well-formed card list.
	#[error("malformed {deck} partition: {source}")]
	Malformed {
		deck: Deck,
		#[source]
		source: serde_json::Error,
	},

	/// A card is tagged with a different deck than the partition it came from.
	#[error("{deck} partition contains card {id} tagged as {found}")]
	DeckMismatch { deck: Deck, id: CardId, found: Deck },
}

impl DecodeError {
	/// The partition that failed.
	pub fn deck(&self) -> Deck {
		match self {
			Self::Open { deck, .. } | Self::Read { deck, .. } | Self::Malformed { deck, .. } | Self::DeckMismatch { deck, .. } => *deck,
		}
	}
}

/// A whole load cycle failed. No catalog is produced for the cycle.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("catalog load failed: {0}")]
	Decode(#[from] DecodeError),

	/// The decode task for a partition panicked.
	#[error("catalog load failed: decode task for {deck} partition aborted: {source}")]
	Aborted {
		deck: Deck,
		#[source]
		source: tokio::task::JoinError,
	},
}

impl LoadError {
	/// The first failing partition in enumeration order.
	pub fn deck(&self) -> Deck {
		match self {
			Self::Decode(error) => error.deck(),
			Self::Aborted { deck, .. } => *deck,
		}
	}
}

/// Errors raised while reading catalog configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

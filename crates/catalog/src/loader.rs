//! Concurrent fan-out load of every partition into one catalog.
//!
//! # Invariants
//!
//! - Every decode task finishes before any result is inspected.
//! - A single failing partition fails the whole cycle; no partial catalog.
//! - Output order depends only on ids, deck enumeration order and
//!   within-partition order, never on task completion order.

use std::sync::Arc;
use std::time::Instant;

use burrow_worker::TaskClass;
use tracing::{debug, info, warn};

use crate::decode::decode_partition;
use crate::error::LoadError;
use crate::source::PartitionSource;
use crate::{Catalog, Deck};

/// Loads every deck in [`Deck::ALL`].
pub async fn load_catalog(source: Arc<dyn PartitionSource>) -> Result<Catalog, LoadError> {
	load_all(source, &Deck::ALL).await
}

/// Decodes each of `decks` on its own blocking task, waits for all of them,
/// then merges the results sorted by id.
///
/// `decks` is the enumeration order for tie-breaking and for choosing which
/// failure to report when several partitions fail.
pub async fn load_all(source: Arc<dyn PartitionSource>, decks: &[Deck]) -> Result<Catalog, LoadError> {
	let started = Instant::now();

	let tasks: Vec<_> = decks
		.iter()
		.map(|&deck| {
			let source = source.clone();
			let handle = burrow_worker::spawn_blocking(TaskClass::Decode, move || decode_partition(&*source, deck));
			(deck, handle)
		})
		.collect();

	let mut slots = Vec::with_capacity(tasks.len());
	for (deck, handle) in tasks {
		slots.push((deck, handle.await));
	}

	let mut merged = Vec::new();
	let mut failure: Option<LoadError> = None;
	for (deck, slot) in slots {
		let error = match slot {
			Ok(Ok(cards)) => {
				merged.extend(cards);
				continue;
			}
			Ok(Err(error)) => LoadError::Decode(error),
			Err(source) => LoadError::Aborted { deck, source },
		};
		if failure.is_none() {
			failure = Some(error);
		} else {
			debug!(deck = %deck, %error, "catalog.load.additional_failure");
		}
	}
	if let Some(error) = failure {
		return Err(error);
	}

	merged.sort_by_key(|card| card.id);

	let duplicates = merged.windows(2).filter(|pair| pair[0].id == pair[1].id).count();
	if duplicates > 0 {
		warn!(duplicates, "catalog.load.duplicate_ids");
	}

	info!(
		decks = decks.len(),
		cards = merged.len(),
		elapsed_ms = started.elapsed().as_millis() as u64,
		"catalog.load.complete"
	);
	Ok(Catalog::from_sorted(merged))
}

#[cfg(test)]
mod tests {
	use std::io::{self, Read};

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::CardId;
	use crate::error::DecodeError;
	use crate::source::{BundledSource, MemorySource};

	struct PanickingSource;

	impl PartitionSource for PanickingSource {
		fn open(&self, deck: Deck) -> io::Result<Box<dyn Read + Send>> {
			if deck == Deck::Red {
				panic!("red partition exploded");
			}
			Ok(Box::new("[]".as_bytes()))
		}
	}

	fn partition(deck: Deck, ids: &[u32]) -> String {
		let tag = serde_json::to_string(&deck).expect("deck tag");
		let cards: Vec<_> = ids
			.iter()
			.map(|id| format!(r#"{{"id": {id}, "deck": {tag}, "title": "{deck} {id}", "type": "RUN", "text": ""}}"#))
			.collect();
		format!("[{}]", cards.join(","))
	}

	#[tokio::test]
	async fn merges_and_sorts_partitions() {
		let source = MemorySource::new()
			.with(Deck::Blue, partition(Deck::Blue, &[9, 1]))
			.with(Deck::Red, partition(Deck::Red, &[4, 2]));

		let catalog = load_all(Arc::new(source), &[Deck::Blue, Deck::Red]).await.expect("load succeeds");
		let ids: Vec<_> = catalog.iter().map(|c| c.id.get()).collect();
		assert_eq!(ids, vec![1, 2, 4, 9]);
	}

	#[tokio::test]
	async fn first_failure_in_enumeration_order_is_reported() {
		let source = MemorySource::new()
			.with(Deck::Blue, partition(Deck::Blue, &[1]))
			.with(Deck::Yellow, "not json")
			.with(Deck::Red, "[");

		let err = load_all(Arc::new(source), &[Deck::Blue, Deck::Yellow, Deck::Red])
			.await
			.expect_err("load fails");
		assert_eq!(err.deck(), Deck::Yellow);
		assert!(matches!(err, LoadError::Decode(DecodeError::Malformed { .. })), "{err:?}");
	}

	#[tokio::test]
	async fn missing_partition_fails_cycle() {
		let source = MemorySource::new().with(Deck::Blue, partition(Deck::Blue, &[1]));
		let err = load_all(Arc::new(source), &[Deck::Blue, Deck::Green]).await.expect_err("green missing");
		assert_eq!(err.deck(), Deck::Green);
	}

	#[tokio::test]
	async fn panicking_decode_is_aborted_error() {
		let err = load_all(Arc::new(PanickingSource), &[Deck::Blue, Deck::Red]).await.expect_err("red panics");
		assert!(matches!(err, LoadError::Aborted { deck: Deck::Red, .. }), "{err:?}");
	}

	#[tokio::test]
	async fn empty_deck_set_yields_empty_catalog() {
		let catalog = load_all(Arc::new(MemorySource::new()), &[]).await.expect("nothing to load");
		assert!(catalog.is_empty());
	}

	#[tokio::test]
	async fn bundled_catalog_is_sorted_and_unique() {
		let catalog = load_catalog(Arc::new(BundledSource)).await.expect("bundled load");
		assert!(!catalog.is_empty());
		assert!(catalog.cards().windows(2).all(|w| w[0].id < w[1].id));
		for deck in Deck::ALL {
			assert!(catalog.by_deck(deck).next().is_some(), "{deck} contributed nothing");
		}
		assert_eq!(catalog.find(CardId(1)).map(|c| c.deck).found(), Some(Deck::Blue));
	}
}

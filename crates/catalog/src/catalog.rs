//! Immutable, id-sorted catalog snapshots.
//!
//! # Invariants
//!
//! - Cards are sorted ascending by id. Equal ids keep their merge order.
//! - A `Catalog` is never mutated after construction; clones share storage.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::lookup::{QueryResult, card_key, search_first};
use crate::{Card, CardId, Deck};

/// Merged set of cards from every deck as of one load cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct Catalog {
	cards: Arc<[Card]>,
}

impl Catalog {
	/// The empty catalog visible before the first successful load.
	pub fn empty() -> Self {
		Self { cards: Arc::from(Vec::new()) }
	}

	/// Wraps cards already sorted by id.
	pub(crate) fn from_sorted(cards: Vec<Card>) -> Self {
		debug_assert!(cards.windows(2).all(|w| w[0].id <= w[1].id), "catalog cards must be sorted by id");
		Self { cards: Arc::from(cards) }
	}

	/// Sorts `cards` by id (stable) and wraps them.
	pub fn from_unsorted(mut cards: Vec<Card>) -> Self {
		cards.sort_by_key(|card| card.id);
		Self::from_sorted(cards)
	}

	pub fn len(&self) -> usize {
		self.cards.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cards.is_empty()
	}

	pub fn cards(&self) -> &[Card] {
		&self.cards
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Card> {
		self.cards.iter()
	}

	/// Cards of one deck, in catalog order.
	pub fn by_deck(&self, deck: Deck) -> impl Iterator<Item = &Card> + '_ {
		self.cards.iter().filter(move |card| card.deck == deck)
	}

	/// Binary search by id. With duplicate ids the first in catalog order wins.
	pub fn find(&self, id: CardId) -> QueryResult<&Card> {
		search_first(&self.cards[..], &id, card_key).map(|idx| &self.cards[idx]).into()
	}

	/// Like [`Self::find`], returning a handle that keeps this snapshot alive.
	pub fn find_ref(&self, id: CardId) -> QueryResult<CardRef> {
		search_first(&self.cards[..], &id, card_key)
			.map(|index| CardRef {
				catalog: self.clone(),
				index,
			})
			.into()
	}

	/// Returns true if both values share the same storage.
	pub fn ptr_eq(&self, other: &Catalog) -> bool {
		Arc::ptr_eq(&self.cards, &other.cards)
	}
}

impl Default for Catalog {
	fn default() -> Self {
		Self::empty()
	}
}

impl fmt::Debug for Catalog {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Catalog").field("len", &self.cards.len()).finish()
	}
}

impl<'a> IntoIterator for &'a Catalog {
	type Item = &'a Card;
	type IntoIter = std::slice::Iter<'a, Card>;

	fn into_iter(self) -> Self::IntoIter {
		self.cards.iter()
	}
}

/// Card handle pinning the catalog snapshot it was found in.
#[derive(Clone)]
pub struct CardRef {
	catalog: Catalog,
	index: usize,
}

impl CardRef {
	/// The snapshot this card belongs to.
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}
}

impl Deref for CardRef {
	type Target = Card;

	fn deref(&self) -> &Card {
		&self.catalog.cards[self.index]
	}
}

impl fmt::Debug for CardRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CardRef").field("id", &self.id).field("deck", &self.deck).finish()
	}
}

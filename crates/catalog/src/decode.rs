//! Partition decoding.
//!
//! Pure functions of their input: safe to run for many decks at once.

use std::io::{BufReader, Read};

use crate::error::DecodeError;
use crate::source::PartitionSource;
use crate::{Card, Deck};

/// Decodes one partition's JSON card list.
///
/// Either every card decodes or the whole partition fails; card order is kept
/// exactly as encoded.
pub fn decode(deck: Deck, reader: impl Read) -> Result<Vec<Card>, DecodeError> {
	let cards: Vec<Card> = serde_json::from_reader(BufReader::new(reader)).map_err(|source| {
		if source.is_io() {
			DecodeError::Read { deck, source: source.into() }
		} else {
			DecodeError::Malformed { deck, source }
		}
	})?;

	if let Some(card) = cards.iter().find(|card| card.deck != deck) {
		return Err(DecodeError::DeckMismatch {
			deck,
			id: card.id,
			found: card.deck,
		});
	}

	Ok(cards)
}

/// Opens `deck` from `source` and decodes it.
pub fn decode_partition(source: &dyn PartitionSource, deck: Deck) -> Result<Vec<Card>, DecodeError> {
	let reader = source.open(deck).map_err(|source| DecodeError::Open { deck, source })?;
	let cards = decode(deck, reader)?;
	tracing::debug!(deck = %deck, cards = cards.len(), "catalog.decode.partition");
	Ok(cards)
}

//! The fixed set of decks and their descriptors.

use serde::{Deserialize, Serialize};

/// One independently loaded partition of the catalog.
///
/// The variant order is the enumeration order used to break ties between
/// equal card ids when partitions are merged.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Deck {
	Blue,
	Yellow,
	Red,
	Violet,
	Orange,
	Green,
}

/// Presentation metadata for a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckInfo {
	pub title: &'static str,
	/// `0xRRGGBB`.
	pub color: u32,
	pub description: &'static str,
}

impl Deck {
	/// Every deck, in enumeration order.
	pub const ALL: [Deck; 6] = [Deck::Blue, Deck::Yellow, Deck::Red, Deck::Violet, Deck::Orange, Deck::Green];

	/// Kebab-case name, also the partition file stem.
	pub fn name(self) -> &'static str {
		self.into()
	}

	/// Position in [`Deck::ALL`].
	pub const fn ordinal(self) -> usize {
		self as usize
	}

	pub fn info(self) -> &'static DeckInfo {
		&DECK_INFO[self.ordinal()]
	}
}

static DECK_INFO: [DeckInfo; 6] = [
	DeckInfo {
		title: "Blue",
		color: 0x2B5FB4,
		description: "Starter deck",
	},
	DeckInfo {
		title: "Yellow",
		color: 0xF2C230,
		description: "Booster deck",
	},
	DeckInfo {
		title: "Red",
		color: 0xC8312B,
		description: "Booster deck",
	},
	DeckInfo {
		title: "Violet",
		color: 0x7B4AA8,
		description: "Booster deck",
	},
	DeckInfo {
		title: "Orange",
		color: 0xE8772E,
		description: "Booster deck",
	},
	DeckInfo {
		title: "Green",
		color: 0x3E9B4F,
		description: "Booster deck",
	},
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordinals_follow_all() {
		for (idx, deck) in Deck::ALL.iter().enumerate() {
			assert_eq!(deck.ordinal(), idx);
		}
	}

	#[test]
	fn names_round_trip_through_from_str() {
		for deck in Deck::ALL {
			assert_eq!(deck.name().parse::<Deck>(), Ok(deck));
		}
		assert_eq!("VIOLET".parse::<Deck>(), Ok(Deck::Violet));
		assert!("teal".parse::<Deck>().is_err());
	}

	#[test]
	fn serde_tag_is_screaming_case() {
		assert_eq!(serde_json::to_string(&Deck::Orange).expect("serialize"), "\"ORANGE\"");
	}
}

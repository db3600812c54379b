//! Card records.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Deck;

/// Stable card identifier. Sort and lookup key of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
	pub const fn get(self) -> u32 {
		self.0
	}
}

impl fmt::Display for CardId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Accepts `42` and `#42`.
impl FromStr for CardId {
	type Err = ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.trim();
		let digits = digits.strip_prefix('#').unwrap_or(digits);
		digits.parse().map(CardId)
	}
}

impl From<u32> for CardId {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

/// Card category printed in the card's corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardKind {
	Run,
	Play,
	Special,
	VerySpecial,
	Bunny,
	Carrot,
	Cabbage,
	Water,
	Dolla,
	Weapon,
	Zodiac,
}

impl CardKind {
	pub const fn label(self) -> &'static str {
		match self {
			Self::Run => "Run",
			Self::Play => "Play",
			Self::Special => "Special",
			Self::VerySpecial => "Very Special",
			Self::Bunny => "Bunny",
			Self::Carrot => "Carrot",
			Self::Cabbage => "Cabbage",
			Self::Water => "Water",
			Self::Dolla => "Dolla",
			Self::Weapon => "Weapon",
			Self::Zodiac => "Zodiac",
		}
	}
}

/// Whether a card may only be played while its owner has a bunny in play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BunnyRequirement {
	#[default]
	No,
	Yes,
	Special,
}

/// One immutable card record.
///
/// Encoded as a JSON object with camelCase keys. Unknown keys are ignored;
/// every field except `bunnyRequirement` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
	pub id: CardId,
	pub deck: Deck,
	pub title: String,
	#[serde(rename = "type")]
	pub kind: CardKind,
	/// Rules text.
	pub text: String,
	#[serde(default)]
	pub bunny_requirement: BunnyRequirement,
}

//! Binary search over key-sorted slices.

use crate::{Card, CardId};

/// Outcome of a point lookup. A miss is an ordinary answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResult<T> {
	Found(T),
	NotFound,
}

impl<T> QueryResult<T> {
	pub fn is_found(&self) -> bool {
		matches!(self, Self::Found(_))
	}

	pub fn found(self) -> Option<T> {
		match self {
			Self::Found(item) => Some(item),
			Self::NotFound => None,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryResult<U> {
		match self {
			Self::Found(item) => QueryResult::Found(f(item)),
			Self::NotFound => QueryResult::NotFound,
		}
	}
}

impl<T> From<Option<T>> for QueryResult<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(item) => Self::Found(item),
			None => Self::NotFound,
		}
	}
}

/// Sort and search key of a card.
pub(crate) fn card_key(card: &Card) -> &CardId {
	&card.id
}

/// Returns the index of the first element whose key equals `key`.
///
/// `items` must be sorted ascending by `key_of`. With duplicate keys the
/// lowest index wins.
pub fn search_first<T, K>(items: &[T], key: &K, key_of: impl Fn(&T) -> &K) -> Option<usize>
where
	K: Ord + ?Sized,
{
	let idx = items.partition_point(|item| key_of(item) < key);
	items.get(idx).filter(|item| key_of(item) == key).map(|_| idx)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ident(x: &u32) -> &u32 {
		x
	}

	#[test]
	fn finds_present_keys() {
		let items = [1u32, 3, 5, 7];
		assert_eq!(search_first(&items, &5, ident), Some(2));
		assert_eq!(search_first(&items, &1, ident), Some(0));
		assert_eq!(search_first(&items, &7, ident), Some(3));
	}

	#[test]
	fn misses_between_and_outside() {
		let items = [1u32, 3, 5, 7];
		assert_eq!(search_first(&items, &4, ident), None);
		assert_eq!(search_first(&items, &0, ident), None);
		assert_eq!(search_first(&items, &8, ident), None);
		assert_eq!(search_first(&[] as &[u32], &1, ident), None);
	}

	#[test]
	fn duplicate_keys_resolve_to_first() {
		let items = [(1u32, 'a'), (2, 'b'), (2, 'c'), (2, 'd'), (9, 'e')];
		assert_eq!(search_first(&items, &2, |(k, _)| k), Some(1));
	}

	#[test]
	fn query_result_from_option() {
		assert_eq!(QueryResult::from(Some(1)), QueryResult::Found(1));
		assert_eq!(QueryResult::<u8>::from(None), QueryResult::NotFound);
		assert_eq!(QueryResult::Found(2).map(|x| x * 2).found(), Some(4));
	}
}

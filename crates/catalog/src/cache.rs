//! Replay-latest multicast cell for the current catalog.
//!
//! # Role
//!
//! Holds the most recent successfully loaded [`Catalog`] and fans every newly
//! published value out to all live subscribers.
//!
//! # Invariants
//!
//! - A new subscription's first value is the value current at subscribe time.
//! - Every subscriber sees every later publish, in publish order.
//! - Publishing never waits on a subscriber; each has its own unbounded queue.
//! - Subscribe and publish serialize on the registry lock, so no publish can
//!   fall between a subscriber's initial value and its registration.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::catalog::CardRef;
use crate::lookup::QueryResult;
use crate::{CardId, Catalog};

#[derive(Debug, Default)]
struct Registry {
	subscribers: Vec<mpsc::UnboundedSender<Catalog>>,
	published: u64,
	closed: bool,
}

/// Current catalog plus its subscriber registry.
#[derive(Debug)]
pub struct CatalogCache {
	current: ArcSwap<Catalog>,
	registry: Mutex<Registry>,
}

impl Default for CatalogCache {
	fn default() -> Self {
		Self::new()
	}
}

impl CatalogCache {
	/// Creates a cache holding the empty catalog.
	pub fn new() -> Self {
		Self::with_initial(Catalog::empty())
	}

	pub fn with_initial(catalog: Catalog) -> Self {
		Self {
			current: ArcSwap::from_pointee(catalog),
			registry: Mutex::new(Registry::default()),
		}
	}

	/// Replaces the current value and delivers it to every live subscriber.
	///
	/// Returns `false` if the cache has been closed; the value is then dropped.
	pub fn publish(&self, catalog: Catalog) -> bool {
		let mut registry = self.registry.lock();
		if registry.closed {
			tracing::warn!(cards = catalog.len(), "catalog.cache.publish_after_close");
			return false;
		}

		self.current.store(Arc::new(catalog.clone()));
		registry.subscribers.retain(|tx| tx.send(catalog.clone()).is_ok());
		registry.published += 1;
		tracing::debug!(
			cards = catalog.len(),
			subscribers = registry.subscribers.len(),
			published = registry.published,
			"catalog.cache.publish"
		);
		true
	}

	/// Subscribes to the current value and every later publish.
	///
	/// On a closed cache the subscription yields the current value and ends.
	pub fn subscribe(&self) -> CatalogSubscription {
		let (tx, rx) = mpsc::unbounded_channel();
		let mut registry = self.registry.lock();
		let _ = tx.send(self.current_value());
		if !registry.closed {
			registry.subscribers.push(tx);
		}
		CatalogSubscription { rx }
	}

	/// Snapshot of the current value without subscribing.
	pub fn current_value(&self) -> Catalog {
		Catalog::clone(&self.current.load())
	}

	/// Finds a card in the current value.
	pub fn lookup(&self, id: CardId) -> QueryResult<CardRef> {
		self.current_value().find_ref(id)
	}

	/// Number of subscriptions that have not been dropped.
	pub fn subscriber_count(&self) -> usize {
		let mut registry = self.registry.lock();
		registry.subscribers.retain(|tx| !tx.is_closed());
		registry.subscribers.len()
	}

	/// Number of successful publishes so far.
	pub fn publish_count(&self) -> u64 {
		self.registry.lock().published
	}

	/// Ends every subscription and rejects further publishes.
	///
	/// The current value stays readable.
	pub fn close(&self) {
		let mut registry = self.registry.lock();
		if registry.closed {
			return;
		}
		registry.closed = true;
		let released = registry.subscribers.len();
		registry.subscribers.clear();
		tracing::debug!(released, "catalog.cache.closed");
	}

	pub fn is_closed(&self) -> bool {
		self.registry.lock().closed
	}
}

/// Receiving end of [`CatalogCache::subscribe`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct CatalogSubscription {
	rx: mpsc::UnboundedReceiver<Catalog>,
}

impl CatalogSubscription {
	/// Waits for the next value. `None` once the cache is closed and drained.
	pub async fn next(&mut self) -> Option<Catalog> {
		self.rx.recv().await
	}

	/// Returns the next queued value without waiting.
	pub fn try_next(&mut self) -> Option<Catalog> {
		self.rx.try_recv().ok()
	}

	/// Drains the queue, returning only the newest value.
	pub fn latest(&mut self) -> Option<Catalog> {
		let mut newest = None;
		while let Ok(catalog) = self.rx.try_recv() {
			newest = Some(catalog);
		}
		newest
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::card::{BunnyRequirement, CardKind};
	use crate::{Card, Deck};

	fn catalog(ids: &[u32]) -> Catalog {
		Catalog::from_unsorted(
			ids.iter()
				.map(|&id| Card {
					id: CardId(id),
					deck: Deck::Blue,
					title: format!("card {id}"),
					kind: CardKind::Play,
					text: String::new(),
					bunny_requirement: BunnyRequirement::No,
				})
				.collect(),
		)
	}

	fn ids(catalog: &Catalog) -> Vec<u32> {
		catalog.iter().map(|c| c.id.get()).collect()
	}

	#[test]
	fn starts_empty() {
		let cache = CatalogCache::new();
		assert!(cache.current_value().is_empty());
		let mut sub = cache.subscribe();
		assert!(sub.try_next().expect("initial value").is_empty());
		assert!(sub.try_next().is_none());
	}

	#[test]
	fn late_subscriber_replays_latest() {
		let cache = CatalogCache::new();
		cache.publish(catalog(&[1, 2]));
		cache.publish(catalog(&[3]));

		let mut sub = cache.subscribe();
		assert_eq!(ids(&sub.try_next().expect("replayed value")), vec![3]);
		assert!(sub.try_next().is_none());
	}

	#[test]
	fn subscribers_each_see_every_publish_in_order() {
		let cache = CatalogCache::new();
		let mut a = cache.subscribe();
		let mut b = cache.subscribe();
		cache.publish(catalog(&[1]));
		cache.publish(catalog(&[2]));

		for sub in [&mut a, &mut b] {
			let seen: Vec<_> = std::iter::from_fn(|| sub.try_next()).map(|c| ids(&c)).collect();
			assert_eq!(seen, vec![vec![], vec![1], vec![2]]);
		}
	}

	#[test]
	fn slow_subscriber_does_not_block_publish() {
		let cache = CatalogCache::new();
		let mut idle = cache.subscribe();
		for id in 0..100 {
			assert!(cache.publish(catalog(&[id])));
		}
		assert_eq!(ids(&cache.current_value()), vec![99]);
		assert_eq!(ids(&idle.latest().expect("queued values")), vec![99]);
	}

	#[test]
	fn dropped_subscribers_are_pruned() {
		let cache = CatalogCache::new();
		let keep = cache.subscribe();
		drop(cache.subscribe());
		assert_eq!(cache.subscriber_count(), 1);
		cache.publish(catalog(&[1]));
		assert_eq!(cache.subscriber_count(), 1);
		drop(keep);
		assert_eq!(cache.subscriber_count(), 0);
	}

	#[test]
	fn lookup_reads_current_value() {
		let cache = CatalogCache::new();
		assert_eq!(cache.lookup(CardId(5)).found().map(|c| c.id), None);
		cache.publish(catalog(&[1, 3, 5, 7]));
		assert_eq!(cache.lookup(CardId(5)).found().map(|c| c.id), Some(CardId(5)));
		assert!(!cache.lookup(CardId(4)).is_found());
	}

	#[tokio::test]
	async fn close_ends_subscriptions_and_rejects_publish() {
		let cache = CatalogCache::new();
		cache.publish(catalog(&[1]));
		let mut sub = cache.subscribe();
		cache.close();

		assert_eq!(ids(&sub.next().await.expect("initial value")), vec![1]);
		assert!(sub.next().await.is_none());
		assert!(!cache.publish(catalog(&[2])));
		assert_eq!(ids(&cache.current_value()), vec![1]);

		let mut late = cache.subscribe();
		assert_eq!(ids(&late.next().await.expect("current value")), vec![1]);
		assert!(late.next().await.is_none());
	}

	#[tokio::test]
	async fn concurrent_publishers_and_subscribers() {
		let cache = Arc::new(CatalogCache::new());
		let mut handles = Vec::new();
		for worker in 0..4u32 {
			let cache = cache.clone();
			handles.push(tokio::spawn(async move {
				for round in 0..25u32 {
					let mut sub = cache.subscribe();
					assert!(sub.try_next().is_some(), "subscription must start with a value");
					cache.publish(catalog(&[worker * 100 + round]));
					tokio::task::yield_now().await;
				}
			}));
		}
		for handle in handles {
			tokio::time::timeout(Duration::from_secs(5), handle)
				.await
				.expect("no deadlock")
				.expect("task ok");
		}
		assert_eq!(cache.publish_count(), 100);
		assert_eq!(cache.current_value().len(), 1);
	}
}

//! Reload-driven catalog service.
//!
//! # Role
//!
//! Owns the [`CatalogCache`] and a driver task that turns every
//! [`ReloadRequest`] into one independent load cycle. Successful cycles
//! publish; failed cycles are logged and leave the cached value untouched.
//!
//! # Invariants
//!
//! - Triggers are never coalesced or cancelled by later triggers; each starts
//!   its own cycle, and whichever successful cycle publishes last wins.
//! - Every accepted trigger runs: the trigger queue is unbounded, and shutdown
//!   closes it and starts a cycle for each request still queued before
//!   waiting for in-flight cycles and closing the cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use burrow_worker::{TaskClass, WorkerJoinSet};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cache::{CatalogCache, CatalogSubscription};
use crate::catalog::CardRef;
use crate::config::CatalogConfig;
use crate::error::LoadError;
use crate::loader::load_all;
use crate::lookup::QueryResult;
use crate::source::PartitionSource;
use crate::{CardId, Catalog, Deck};

/// Unit reload signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequest;

/// Cloneable handle for requesting reloads.
#[derive(Debug, Clone)]
pub struct ReloadTrigger {
	tx: mpsc::UnboundedSender<ReloadRequest>,
}

impl ReloadTrigger {
	/// Requests one load cycle. Returns `false` once the service has shut down.
	pub fn request(&self) -> bool {
		self.tx.send(ReloadRequest).is_ok()
	}
}

/// Runs load cycles against one source and publishes into one cache.
struct Reloader {
	source: Arc<dyn PartitionSource>,
	decks: Vec<Deck>,
	cache: Arc<CatalogCache>,
	cycles: AtomicU64,
}

impl Reloader {
	async fn run_cycle(&self) -> Result<Catalog, LoadError> {
		let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
		debug!(cycle, decks = self.decks.len(), "catalog.cycle.start");
		match load_all(self.source.clone(), &self.decks).await {
			Ok(catalog) => {
				if self.cache.publish(catalog.clone()) {
					info!(cycle, cards = catalog.len(), "catalog.cycle.published");
				}
				Ok(catalog)
			}
			Err(err) => {
				error!(cycle, deck = %err.deck(), error = %err, "catalog.cycle.failed");
				Err(err)
			}
		}
	}
}

/// Composition-root owned catalog service.
pub struct CatalogService {
	reloader: Arc<Reloader>,
	trigger: ReloadTrigger,
	cancel: CancellationToken,
	driver: JoinHandle<()>,
}

impl CatalogService {
	/// Starts the driver for every deck in [`Deck::ALL`].
	pub fn start(source: Arc<dyn PartitionSource>, config: &CatalogConfig) -> Self {
		Self::start_with_decks(source, Deck::ALL.to_vec(), config)
	}

	/// Starts the driver for a specific deck set, in enumeration order.
	pub fn start_with_decks(source: Arc<dyn PartitionSource>, decks: Vec<Deck>, config: &CatalogConfig) -> Self {
		let reloader = Arc::new(Reloader {
			source,
			decks,
			cache: Arc::new(CatalogCache::new()),
			cycles: AtomicU64::new(0),
		});
		let (tx, rx) = mpsc::unbounded_channel();
		let cancel = CancellationToken::new();
		let driver = burrow_worker::spawn(TaskClass::Driver, drive(reloader.clone(), rx, cancel.clone()));
		let trigger = ReloadTrigger { tx };

		if config.load_on_start {
			trigger.request();
		}

		Self {
			reloader,
			trigger,
			cancel,
			driver,
		}
	}

	/// A handle other components can use to request reloads.
	pub fn trigger(&self) -> ReloadTrigger {
		self.trigger.clone()
	}

	/// Requests one asynchronous load cycle.
	pub fn reload(&self) -> bool {
		self.trigger.request()
	}

	/// Runs one load cycle inline, publishing on success.
	pub async fn reload_now(&self) -> Result<Catalog, LoadError> {
		self.reloader.run_cycle().await
	}

	pub fn cache(&self) -> &Arc<CatalogCache> {
		&self.reloader.cache
	}

	pub fn subscribe(&self) -> CatalogSubscription {
		self.reloader.cache.subscribe()
	}

	pub fn current(&self) -> Catalog {
		self.reloader.cache.current_value()
	}

	pub fn lookup(&self, id: CardId) -> QueryResult<CardRef> {
		self.reloader.cache.lookup(id)
	}

	/// Stops accepting triggers, waits for in-flight cycles and closes the cache.
	pub async fn shutdown(self) {
		self.cancel.cancel();
		if let Err(err) = self.driver.await {
			warn!(error = %err, "catalog.driver.join_failed");
		}
		self.reloader.cache.close();
	}
}

async fn drive(reloader: Arc<Reloader>, mut rx: mpsc::UnboundedReceiver<ReloadRequest>, cancel: CancellationToken) {
	let mut inflight = WorkerJoinSet::new(TaskClass::LoadCycle);
	loop {
		tokio::select! {
			_ = cancel.cancelled() => break,
			received = rx.recv() => match received {
				Some(ReloadRequest) => start_cycle(&mut inflight, &reloader),
				None => break,
			},
			Some(done) = inflight.join_next(), if !inflight.is_empty() => {
				if let Err(err) = done {
					warn!(error = %err, "catalog.cycle.task_failed");
				}
			}
		}
	}

	rx.close();
	let mut queued = 0usize;
	while let Some(ReloadRequest) = rx.recv().await {
		queued += 1;
		start_cycle(&mut inflight, &reloader);
	}
	if queued > 0 {
		debug!(queued, "catalog.driver.drained");
	}

	let (finished, _) = inflight.join_all().await;
	debug!(finished, "catalog.driver.stopped");
}

fn start_cycle(inflight: &mut WorkerJoinSet<()>, reloader: &Arc<Reloader>) {
	let reloader = reloader.clone();
	inflight.spawn(async move {
		let _ = reloader.run_cycle().await;
	});
}

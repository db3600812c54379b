use std::future::Future;

use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

use crate::TaskClass;

/// Tokio [`JoinSet`] whose spawns are routed through the worker runtime and
/// traced with a fixed [`TaskClass`].
#[derive(Debug)]
pub struct WorkerJoinSet<T> {
	class: TaskClass,
	inner: JoinSet<T>,
}

impl<T> WorkerJoinSet<T>
where
	T: Send + 'static,
{
	/// Creates an empty join set for the given task class.
	pub fn new(class: TaskClass) -> Self {
		Self { class, inner: JoinSet::new() }
	}

	/// Returns the number of tasks still tracked by the set.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns `true` if no tasks are tracked.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Spawns a future into the set.
	pub fn spawn<F>(&mut self, fut: F)
	where
		F: Future<Output = T> + Send + 'static,
	{
		tracing::trace!(worker_class = self.class.as_str(), pending = self.inner.len(), "worker.join_set.spawn");
		let handle = crate::spawn::runtime_handle();
		self.inner.spawn_on(fut.instrument(crate::spawn::task_span(self.class)), &handle);
	}

	/// Waits for the next task to finish, in completion order.
	pub async fn join_next(&mut self) -> Option<Result<T, JoinError>> {
		self.inner.join_next().await
	}

	/// Waits for every tracked task, returning how many finished and how many
	/// of those panicked.
	pub async fn join_all(&mut self) -> (usize, usize) {
		let mut finished = 0usize;
		let mut panicked = 0usize;
		while let Some(result) = self.inner.join_next().await {
			finished += 1;
			if let Err(error) = result {
				panicked += 1;
				tracing::warn!(worker_class = self.class.as_str(), %error, "worker.join_set.task_failed");
			}
		}
		(finished, panicked)
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[tokio::test]
	async fn join_all_waits_for_every_task() {
		let mut set = WorkerJoinSet::new(TaskClass::LoadCycle);
		for delay in [30u64, 5, 15] {
			set.spawn(async move {
				tokio::time::sleep(Duration::from_millis(delay)).await;
			});
		}
		assert_eq!(set.len(), 3);

		let (finished, panicked) = set.join_all().await;
		assert_eq!(finished, 3);
		assert_eq!(panicked, 0);
		assert!(set.is_empty());
	}

	#[tokio::test]
	async fn join_next_yields_completion_order() {
		let mut set = WorkerJoinSet::new(TaskClass::LoadCycle);
		set.spawn(async {
			tokio::time::sleep(Duration::from_millis(40)).await;
			"slow"
		});
		set.spawn(async { "fast" });

		let first = set.join_next().await.expect("task tracked").expect("task ok");
		assert_eq!(first, "fast");
	}
}

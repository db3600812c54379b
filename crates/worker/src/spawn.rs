use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{Instrument, Span};

use crate::TaskClass;

static FALLBACK: OnceLock<Runtime> = OnceLock::new();

/// Handle to spawn on: the caller's runtime if there is one, otherwise a
/// process-wide fallback runtime built on first use.
pub(crate) fn runtime_handle() -> Handle {
	Handle::try_current().unwrap_or_else(|_| {
		FALLBACK
			.get_or_init(|| {
				Builder::new_multi_thread()
					.enable_all()
					.worker_threads(2)
					.thread_name("burrow-fallback")
					.build()
					.expect("burrow fallback runtime")
			})
			.handle()
			.clone()
	})
}

/// Span every spawned task runs inside, so events from decode and load work
/// carry their class.
pub(crate) fn task_span(class: TaskClass) -> Span {
	tracing::debug_span!("worker.task", class = class.as_str())
}

/// Spawns an async task tagged with `class`.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	runtime_handle().spawn(fut.instrument(task_span(class)))
}

/// Runs `f` on the blocking pool inside a `class`-tagged span.
pub fn spawn_blocking<F, R>(class: TaskClass, f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let span = task_span(class);
	runtime_handle().spawn_blocking(move || span.in_scope(f))
}

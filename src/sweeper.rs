//! Background eviction of expired pending authorizations.
//!
//! The sweeper is the only component that runs outside the request/response cycle. It is
//! started once at process initialization and loops forever: sweep the pending store with
//! the configured TTL, log the removal count, sleep, repeat. Sweep failures are logged and
//! never kill the loop. The task is cancellable through its [`SweeperHandle`]; dropping
//! the handle instead detaches the task, which then lives and dies with the runtime.
//!
//! A sweep is not synchronized with concurrent exchanges beyond the store's own lock: a
//! token can expire between the user obtaining the redirect and presenting the verifier,
//! which then surfaces as an unknown-token authorization failure. That is accepted
//! behavior, not a race to fix.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio::{sync::Notify, task::JoinHandle};
// self
use crate::{_prelude::*, store::PendingStore};

/// TTL after which a pending request token is considered stale.
pub const DEFAULT_PENDING_TTL: Duration = Duration::seconds(1800);
/// Pause between consecutive sweeps.
pub const DEFAULT_SWEEP_INTERVAL: StdDuration = StdDuration::from_secs(300);

/// Periodic eviction task for a shared [`PendingStore`].
#[derive(Clone)]
pub struct ExpirySweeper {
	store: Arc<dyn PendingStore>,
	ttl: Duration,
	interval: StdDuration,
}
impl ExpirySweeper {
	/// Creates a sweeper over `store` with the default TTL and interval.
	pub fn new(store: Arc<dyn PendingStore>) -> Self {
		Self { store, ttl: DEFAULT_PENDING_TTL, interval: DEFAULT_SWEEP_INTERVAL }
	}

	/// Overrides the pending-entry TTL.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;

		self
	}

	/// Overrides the pause between sweeps.
	pub fn with_interval(mut self, interval: StdDuration) -> Self {
		self.interval = interval;

		self
	}

	/// Runs one sweep immediately and returns the number of entries removed.
	pub async fn sweep_once(&self) -> Result<usize> {
		let removed = self.store.sweep(self.ttl, OffsetDateTime::now_utc()).await?;

		Ok(removed)
	}

	/// Spawns the perpetual sweep loop onto the current tokio runtime.
	///
	/// Must be called from within a runtime context. Call at most once per sweeper; each
	/// call spawns an independent loop.
	pub fn start(self) -> SweeperHandle {
		let shutdown = Arc::new(Notify::new());
		let task = tokio::spawn(self.run(shutdown.clone()));

		SweeperHandle { shutdown, task }
	}

	async fn run(self, shutdown: Arc<Notify>) {
		loop {
			match self.sweep_once().await {
				Ok(removed) =>
					tracing::info!(removed, "Removed expired pending authorizations."),
				Err(error) => tracing::warn!(%error, "Pending-store sweep failed."),
			}

			tokio::select! {
				_ = shutdown.notified() => break,
				_ = tokio::time::sleep(self.interval) => {},
			}
		}

		tracing::debug!("Expiry sweeper stopped.");
	}
}
impl Debug for ExpirySweeper {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExpirySweeper")
			.field("ttl", &self.ttl)
			.field("interval", &self.interval)
			.finish()
	}
}

/// Handle to a running sweep loop.
///
/// Dropping the handle detaches the loop (daemon semantics: it never blocks process
/// shutdown); [`SweeperHandle::stop`] shuts it down gracefully instead.
#[derive(Debug)]
pub struct SweeperHandle {
	shutdown: Arc<Notify>,
	task: JoinHandle<()>,
}
impl SweeperHandle {
	/// Requests shutdown and waits for the loop to exit.
	pub async fn stop(self) {
		self.shutdown.notify_one();

		let _ = self.task.await;
	}

	/// Checks whether the loop is still running.
	pub fn is_running(&self) -> bool {
		!self.task.is_finished()
	}
}

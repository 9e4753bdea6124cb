// std
use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration as StdDuration,
};
// crates.io
use time::{Duration, OffsetDateTime};
// self
use oauth1_broker::{
	auth::{PendingAuthorization, TokenSecret},
	store::{MemoryStore, PendingStore, StoreError, StoreFuture},
	sweeper::ExpirySweeper,
};

fn aged_entry(token: &str, age: Duration) -> PendingAuthorization {
	PendingAuthorization::new(token, "secret")
		.with_created_at(OffsetDateTime::now_utc() - age)
}

#[tokio::test]
async fn sweep_once_counts_removed_entries() {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn PendingStore> = store_backend.clone();

	store.add(aged_entry("tok-fresh", Duration::seconds(100))).await.expect(
		"Adding the fresh entry should succeed.",
	);
	store.add(aged_entry("tok-stale", Duration::seconds(1900))).await.expect(
		"Adding the stale entry should succeed.",
	);
	store.add(aged_entry("tok-barely", Duration::milliseconds(1_800_100))).await.expect(
		"Adding the barely expired entry should succeed.",
	);

	let sweeper = ExpirySweeper::new(store);
	let removed = sweeper.sweep_once().await.expect("An immediate sweep should succeed.");

	assert_eq!(removed, 2);
	assert_eq!(store_backend.len(), 1);
	assert!(store_backend.contains("tok-fresh"));
}

#[tokio::test]
async fn started_loop_evicts_and_stops_gracefully() {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn PendingStore> = store_backend.clone();

	store.add(aged_entry("tok-stale", Duration::seconds(10))).await.expect(
		"Adding the stale entry should succeed.",
	);

	let handle = ExpirySweeper::new(store)
		.with_ttl(Duration::seconds(5))
		.with_interval(StdDuration::from_millis(10))
		.start();

	// The first sweep runs before the first sleep, so a short wait suffices.
	tokio::time::sleep(StdDuration::from_millis(50)).await;

	assert!(store_backend.is_empty(), "The loop must evict stale entries.");
	assert!(handle.is_running());

	handle.stop().await;
}

#[derive(Default)]
struct BrokenStore {
	sweep_attempts: AtomicUsize,
}
impl PendingStore for BrokenStore {
	fn add(&self, _pending: PendingAuthorization) -> StoreFuture<'_, ()> {
		Box::pin(async { Ok(()) })
	}

	fn pop<'a>(&'a self, _token: &'a str) -> StoreFuture<'a, TokenSecret> {
		Box::pin(async { Err(StoreError::UnknownToken) })
	}

	fn sweep(&self, _ttl: Duration, _now: OffsetDateTime) -> StoreFuture<'_, usize> {
		self.sweep_attempts.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(StoreError::Backend { message: "sweep unavailable".into() }) })
	}
}

#[tokio::test]
async fn sweep_failures_do_not_stop_the_loop() {
	let store_backend = Arc::new(BrokenStore::default());
	let store: Arc<dyn PendingStore> = store_backend.clone();
	let handle = ExpirySweeper::new(store).with_interval(StdDuration::from_millis(10)).start();

	while store_backend.sweep_attempts.load(Ordering::SeqCst) < 3 {
		tokio::time::sleep(StdDuration::from_millis(5)).await;
	}

	assert!(
		handle.is_running(),
		"The loop must keep running after repeated sweep failures.",
	);

	handle.stop().await;
}

#[tokio::test]
async fn loop_keeps_sweeping_across_iterations() {
	let store_backend = Arc::new(MemoryStore::default());
	let store: Arc<dyn PendingStore> = store_backend.clone();
	let handle = ExpirySweeper::new(store.clone())
		.with_ttl(Duration::ZERO)
		.with_interval(StdDuration::from_millis(10))
		.start();

	tokio::time::sleep(StdDuration::from_millis(30)).await;
	store.add(aged_entry("tok-late", Duration::seconds(1))).await.expect(
		"Adding an entry while the loop runs should succeed.",
	);
	tokio::time::sleep(StdDuration::from_millis(50)).await;

	assert!(
		store_backend.is_empty(),
		"Entries added after startup must be evicted by later iterations.",
	);

	handle.stop().await;
}

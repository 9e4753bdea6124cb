//! Storage contracts and built-in store implementations for pending authorizations.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{PendingAuthorization, TokenSecret},
};

/// Storage contract future alias used by [`PendingStore`] implementations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for pending request-token authorizations.
///
/// All operations must be safe under concurrent invocation; no caller may observe a
/// partially inserted or partially removed entry. `pop` and `sweep` racing on the same
/// token must resolve to exactly one removal.
pub trait PendingStore
where
	Self: Send + Sync,
{
	/// Inserts a new pending entry keyed by its request token.
	///
	/// Fails with [`StoreError::DuplicateToken`] if the token is already pending, which a
	/// correctly behaving provider never causes.
	fn add(&self, pending: PendingAuthorization) -> StoreFuture<'_, ()>;

	/// Atomically removes and returns the secret for `token`.
	///
	/// Fails with [`StoreError::UnknownToken`] if the token is absent: already consumed,
	/// expired, or never issued. This is the primary authorization-failure trigger.
	fn pop<'a>(&'a self, token: &'a str) -> StoreFuture<'a, TokenSecret>;

	/// Removes all entries older than `ttl` relative to `now` and returns the count.
	fn sweep(&self, ttl: Duration, now: OffsetDateTime) -> StoreFuture<'_, usize>;
}

/// Error type produced by [`PendingStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// The provider issued a request token that is already pending.
	#[error("Request token is already pending.")]
	DuplicateToken,
	/// The request token is missing: consumed, expired, or never issued.
	#[error("Unknown request token.")]
	UnknownToken,
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

//! Thread-safe in-memory [`PendingStore`] implementation; the only backend the broker needs
//! since pending entries are short-lived process state.

// std
use std::collections::HashMap;
// self
use crate::{
	_prelude::*,
	auth::{PendingAuthorization, TokenSecret},
	store::{PendingStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, PendingAuthorization>>>;

/// Thread-safe in-process store keyed by request token.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of entries currently pending.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Checks whether the store holds no pending entries.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Checks whether `token` is currently pending.
	pub fn contains(&self, token: &str) -> bool {
		self.0.read().contains_key(token)
	}

	fn add_now(map: &StoreMap, pending: PendingAuthorization) -> Result<(), StoreError> {
		let mut guard = map.write();

		if guard.contains_key(&pending.request_token) {
			return Err(StoreError::DuplicateToken);
		}

		guard.insert(pending.request_token.clone(), pending);

		Ok(())
	}

	fn pop_now(map: &StoreMap, token: &str) -> Result<TokenSecret, StoreError> {
		map.write()
			.remove(token)
			.map(|pending| pending.request_token_secret)
			.ok_or(StoreError::UnknownToken)
	}

	fn sweep_now(map: &StoreMap, ttl: Duration, now: OffsetDateTime) -> usize {
		let mut guard = map.write();
		let before = guard.len();

		guard.retain(|_, pending| !pending.is_expired_at(ttl, now));

		before - guard.len()
	}
}
impl PendingStore for MemoryStore {
	fn add(&self, pending: PendingAuthorization) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::add_now(&map, pending) })
	}

	fn pop<'a>(&'a self, token: &'a str) -> StoreFuture<'a, TokenSecret> {
		let map = self.0.clone();
		let token = token.to_owned();

		Box::pin(async move { Self::pop_now(&map, &token) })
	}

	fn sweep(&self, ttl: Duration, now: OffsetDateTime) -> StoreFuture<'_, usize> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::sweep_now(&map, ttl, now)) })
	}
}

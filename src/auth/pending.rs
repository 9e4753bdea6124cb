//! Pending request-token authorizations awaiting the verifier exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// A request token issued by the provider but not yet exchanged for an access token.
///
/// Created when an authorization URL is requested; destroyed either by a successful
/// exchange or by the expiry sweeper once its age exceeds the pending TTL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAuthorization {
	/// Opaque provider-issued request token; unique while pending.
	pub request_token: String,
	/// Secret paired with the request token, used to sign the exchange leg.
	pub request_token_secret: TokenSecret,
	/// Instant the pending entry was created.
	pub created_at: OffsetDateTime,
}
impl PendingAuthorization {
	/// Creates a pending entry timestamped at the current instant.
	pub fn new(
		request_token: impl Into<String>,
		request_token_secret: impl Into<TokenSecret>,
	) -> Self {
		Self {
			request_token: request_token.into(),
			request_token_secret: request_token_secret.into(),
			created_at: OffsetDateTime::now_utc(),
		}
	}

	/// Overrides the creation timestamp; mainly useful for store tests and imports.
	pub fn with_created_at(mut self, created_at: OffsetDateTime) -> Self {
		self.created_at = created_at;

		self
	}

	/// Checks whether the entry is older than `ttl` relative to `now`.
	pub fn is_expired_at(&self, ttl: Duration, now: OffsetDateTime) -> bool {
		now - self.created_at > ttl
	}
}

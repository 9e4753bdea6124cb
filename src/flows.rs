//! High-level flow orchestrators built on the signing primitives.

pub mod authorization;
pub mod fetch;

pub use authorization::*;

// self
use crate::{
	_prelude::*,
	auth::{AuthorizedSession, SessionHolder, TokenSecret},
	http::ReqwestHttpClient,
	provider::ProviderDescriptor,
	store::PendingStore,
};

/// Coordinates the OAuth 1.0a three-legged flow against a single provider.
///
/// The broker owns the HTTP client, the pending-token store, the provider descriptor, and
/// the session holder so the flow implementations can focus on leg-specific logic. It
/// represents exactly one consumer registration and holds at most one authorized identity
/// at a time; callers wanting identity-per-user semantics must run one broker per
/// identity.
#[derive(Clone)]
pub struct Broker {
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: ReqwestHttpClient,
	/// Pending-token store shared with the expiry sweeper.
	pub store: Arc<dyn PendingStore>,
	/// Provider descriptor that defines the endpoint layout.
	pub descriptor: ProviderDescriptor,
	/// OAuth 1.0a consumer key used in every request.
	pub consumer_key: String,
	/// Scope string requested on every authorization attempt.
	pub scopes: String,
	pub(crate) consumer_secret: TokenSecret,
	pub(crate) session: SessionHolder,
}
impl Broker {
	/// Creates a broker with the crate's default reqwest transport.
	pub fn new(
		store: Arc<dyn PendingStore>,
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> Self {
		Self::with_http_client(
			store,
			descriptor,
			consumer_key,
			consumer_secret,
			ReqwestHttpClient::default(),
		)
	}

	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn PendingStore>,
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self {
			http_client,
			store,
			descriptor,
			consumer_key: consumer_key.into(),
			scopes: String::new(),
			consumer_secret: TokenSecret::new(consumer_secret),
			session: SessionHolder::default(),
		}
	}

	/// Sets or replaces the scope string requested during authorization.
	pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
		self.scopes = scopes.into();

		self
	}

	/// Returns the live authorized credential pair, or none if never authorized.
	pub fn current_session(&self) -> Option<AuthorizedSession> {
		self.session.current()
	}
}
impl Debug for Broker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.consumer_key)
			.field("scopes", &self.scopes)
			.field("session_installed", &self.session.is_installed())
			.finish()
	}
}

//! Shared-secret material for request signing: the consumer secret and token secrets.

// self
use crate::{_prelude::*, oauth};

/// Consumer or token secret serving as HMAC-SHA1 key material.
///
/// Both formatter impls emit a fixed placeholder, so a secret cannot reach logs or error
/// messages through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps raw secret material.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Exposes the raw material for signing. The returned slice must never be logged.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Joins this consumer secret with an optional token secret into the HMAC-SHA1 signing
	/// key, `encoded-consumer-secret&encoded-token-secret` (RFC 5849 §3.4.2).
	///
	/// The token half is empty on the request-token leg, where no token secret exists yet.
	pub(crate) fn signing_key(&self, token_secret: Option<&Self>) -> String {
		format!(
			"{}&{}",
			oauth::percent_encode(&self.0),
			oauth::percent_encode(token_secret.map_or("", Self::expose)),
		)
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.into())
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

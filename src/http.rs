//! Transport primitives for provider calls.
//!
//! Every outbound request the broker makes is a `POST` with an empty body: application
//! parameters travel in the query string and protocol parameters in the `Authorization`
//! header. The wrapper owns the only reqwest dependency in the crate and applies the
//! default request timeout so a slow provider cannot stall a request thread or the
//! sweeper indefinitely.

// std
use std::{ops::Deref, time::Duration as StdDuration};
// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{_prelude::*, error::TransportError};

/// Default per-request timeout applied by [`ReqwestHttpClient::default`].
///
/// The upstream protocol leaves the bound unspecified; fifteen seconds keeps handshake
/// legs and fetches comfortably inside interactive-login latency budgets.
pub const DEFAULT_PROVIDER_TIMEOUT: StdDuration = StdDuration::from_secs(15);

/// Response surface the flows consume: the HTTP status plus the raw body text.
#[derive(Clone, Debug)]
pub struct ProviderResponse {
	/// HTTP status code of the response.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}
impl ProviderResponse {
	/// Checks whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider calls should not follow redirects; the authorize redirect is the end user's
/// browser hop, never something the broker chases itself. Configure any custom
/// [`ReqwestClient`] accordingly and with an explicit timeout.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Issues a signed `POST` with an empty body and collects the response.
	pub(crate) async fn post_signed(
		&self,
		url: Url,
		authorization: &str,
	) -> Result<ProviderResponse, TransportError> {
		let response = self
			.0
			.post(url)
			.header(AUTHORIZATION, authorization)
			.body(Vec::new())
			.send()
			.await?;
		let status = response.status().as_u16();
		let body = response.text().await?;

		Ok(ProviderResponse { status, body })
	}
}
impl Default for ReqwestHttpClient {
	fn default() -> Self {
		let client = ReqwestClient::builder()
			.timeout(DEFAULT_PROVIDER_TIMEOUT)
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.unwrap_or_else(|_| {
				unreachable!("Default reqwest client configuration must be buildable.")
			});

		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_exactly_the_2xx_range() {
		assert!(ProviderResponse { status: 200, body: String::new() }.is_success());
		assert!(ProviderResponse { status: 204, body: String::new() }.is_success());
		assert!(!ProviderResponse { status: 199, body: String::new() }.is_success());
		assert!(!ProviderResponse { status: 302, body: String::new() }.is_success());
		assert!(!ProviderResponse { status: 401, body: String::new() }.is_success());
	}
}

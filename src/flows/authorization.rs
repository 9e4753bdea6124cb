//! The three-legged handshake: request-token issuance, verifier exchange, resume, and
//! revocation.
//!
//! A pending request token is inserted into the store when the authorize URL is built and
//! consumed exactly once: either by [`Broker::complete_authorization`] or by the expiry
//! sweeper, whichever wins the race. The loser observes an absent token, so no token is
//! ever double-spent.

// self
use crate::{
	_prelude::*,
	auth::{AuthorizedSession, PendingAuthorization},
	error::ProviderError,
	flows::Broker,
	oauth::{self, Signer},
	store::StoreError,
};

/// Handshake metadata returned by [`Broker::begin_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Provider-issued request token identifying the pending attempt.
	pub request_token: String,
	/// Authorize-page URL the end user must be redirected to.
	pub authorize_url: Url,
}

impl Broker {
	/// Requests a fresh request token and returns the authorize redirect for it.
	///
	/// `callback` is the redirect target the provider sends the user back to after
	/// approval; pass `oob` for the out-of-band PIN flow. The pending entry is recorded in
	/// the store before the session is handed to the caller.
	pub async fn begin_authorization(&self, callback: &str) -> Result<AuthorizationSession> {
		let mut url = self.descriptor.request_token_endpoint();

		if !self.scopes.is_empty() {
			url.query_pairs_mut().append_pair("scopes", &self.scopes);
		}

		let header = self
			.consumer_signer()
			.authorization_header("POST", &url, &[("oauth_callback", callback)]);
		let response = self.http_client.post_signed(url, &header).await?;

		if !response.is_success() {
			return Err(ProviderError::Status { status: response.status }.into());
		}

		let (request_token, request_token_secret) = oauth::parse_token_response(&response.body)?;

		self.store
			.add(PendingAuthorization::new(&request_token, request_token_secret))
			.await?;

		tracing::debug!(request_token = %request_token, "Recorded pending authorization.");

		Ok(AuthorizationSession {
			authorize_url: self.descriptor.authorize_url(&request_token),
			request_token,
		})
	}

	/// Exchanges an approved request token and its verifier for an authorized session.
	///
	/// The pending entry is consumed before the provider exchange, so a second call with
	/// the same token fails regardless of the exchange outcome.
	pub async fn complete_authorization(
		&self,
		request_token: &str,
		verifier: &str,
	) -> Result<AuthorizedSession> {
		let request_token_secret = match self.store.pop(request_token).await {
			Ok(secret) => secret,
			Err(StoreError::UnknownToken) =>
				return Err(Error::authorization("Invalid request token.")),
			Err(err) => return Err(err.into()),
		};
		let url = self.descriptor.access_token_endpoint();
		let header = self
			.consumer_signer()
			.with_token(request_token, &request_token_secret)
			.authorization_header("POST", &url, &[("oauth_verifier", verifier)]);
		let response = self.http_client.post_signed(url, &header).await?;

		if !response.is_success() {
			return Err(Error::authorization("Consumer key or token key does not match."));
		}

		let (access_token, access_token_secret) = oauth::parse_token_response(&response.body)?;
		let session = AuthorizedSession { access_token, access_token_secret };

		self.session.install(session.clone());

		tracing::debug!("Installed authorized session.");

		Ok(session)
	}

	/// Installs externally persisted credentials, then validates them with the identity
	/// probe.
	///
	/// A failed probe clears the holder before returning the error, so the broker never
	/// keeps an invalid stale session installed.
	pub async fn resume(
		&self,
		access_token: impl Into<String>,
		access_token_secret: impl Into<String>,
	) -> Result<()> {
		self.session.install(AuthorizedSession::new(access_token, access_token_secret));

		if !self.probe_identity().await {
			self.session.clear();

			return Err(Error::authorization("Error resuming session."));
		}

		Ok(())
	}

	/// Revokes the current session at the provider, then clears the holder.
	///
	/// Idempotent no-op when nothing is installed. The holder is cleared only after the
	/// provider acknowledged the revocation, so a transport failure leaves the session in
	/// place for a retry.
	pub async fn revoke(&self) -> Result<()> {
		if !self.session.is_installed() {
			return Ok(());
		}

		self.fetch(self.descriptor.revoke_token_path(), &[]).await?;
		self.session.clear();

		tracing::debug!("Revoked authorized session.");

		Ok(())
	}

	pub(crate) fn consumer_signer(&self) -> Signer<'_> {
		Signer::consumer(&self.consumer_key, &self.consumer_secret)
	}
}

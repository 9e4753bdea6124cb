//! Provider descriptor: the fixed base address and the OAuth 1.0a endpoint layout.
//!
//! The broker talks to exactly one provider. The descriptor normalizes the configured base
//! address so it always ends with a path separator, and derives the handshake and service
//! endpoints from the suffixes the provider's REST dialect uses.

// self
use crate::{_prelude::*, error::ConfigError};

const REQUEST_TOKEN_SUFFIX: &str = "services/oauth/request_token";
const AUTHORIZE_SUFFIX: &str = "services/oauth/authorize";
const ACCESS_TOKEN_SUFFIX: &str = "services/oauth/access_token";
const REVOKE_TOKEN_SUFFIX: &str = "services/oauth/revoke_token";
const CURRENT_USER_SUFFIX: &str = "services/users/user";

/// Immutable provider descriptor consumed by every flow.
///
/// Serializable so deployments can keep it next to the consumer credentials in a JSON
/// configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderDescriptor {
	base_address: Url,
}
impl ProviderDescriptor {
	/// Parses and normalizes the provider base address.
	///
	/// A missing trailing path separator is appended so joining service suffixes never
	/// clobbers the last path segment.
	pub fn new(base_address: &str) -> Result<Self, ConfigError> {
		let normalized = if base_address.ends_with('/') {
			base_address.to_owned()
		} else {
			format!("{base_address}/")
		};
		let base_address =
			Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseAddress { source })?;

		Ok(Self { base_address })
	}

	/// Normalized base address, always ending with `/`.
	pub fn base_address(&self) -> &Url {
		&self.base_address
	}

	/// Endpoint for the first handshake leg (request token issuance).
	pub fn request_token_endpoint(&self) -> Url {
		self.suffix_url(REQUEST_TOKEN_SUFFIX)
	}

	/// Browser-facing authorize page, parameterized by a request token.
	pub fn authorize_url(&self, request_token: &str) -> Url {
		let mut url = self.suffix_url(AUTHORIZE_SUFFIX);

		url.query_pairs_mut().append_pair("oauth_token", request_token);

		url
	}

	/// Endpoint for the third handshake leg (access token exchange).
	pub fn access_token_endpoint(&self) -> Url {
		self.suffix_url(ACCESS_TOKEN_SUFFIX)
	}

	/// Token revocation service path, relative to the base address.
	pub fn revoke_token_path(&self) -> &'static str {
		REVOKE_TOKEN_SUFFIX
	}

	/// "Who am I" service path used by the identity probe.
	pub fn current_user_path(&self) -> &'static str {
		CURRENT_USER_SUFFIX
	}

	/// Joins an arbitrary service path onto the base address.
	pub fn service_url(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_address.join(path).map_err(|source| ConfigError::InvalidServicePath {
			path: path.to_owned(),
			source,
		})
	}

	fn suffix_url(&self, suffix: &'static str) -> Url {
		// The suffixes are compile-time constants relative to a normalized base, so joining
		// cannot fail.
		self.base_address
			.join(suffix)
			.unwrap_or_else(|_| unreachable!("Static endpoint suffix must join onto the base."))
	}
}
impl TryFrom<String> for ProviderDescriptor {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(&value)
	}
}
impl From<ProviderDescriptor> for String {
	fn from(value: ProviderDescriptor) -> Self {
		value.base_address.into()
	}
}
impl Display for ProviderDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.base_address.as_str())
	}
}

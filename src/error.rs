//! Broker-level error types shared across flows, the provider transport, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider-level failure on an otherwise healthy transport.
	#[error(transparent)]
	Provider(#[from] ProviderError),

	/// Handshake-level rejection; terminal for the current authorization attempt.
	#[error("Authorization failed: {reason}")]
	Authorization {
		/// Provider- or broker-supplied reason string.
		reason: String,
	},
	/// A signed fetch was attempted without an installed authorized session.
	#[error("No authorized session is installed.")]
	NotAuthorized,
}
impl Error {
	/// Builds an [`Error::Authorization`] from any displayable reason.
	pub fn authorization(reason: impl Into<String>) -> Self {
		Self::Authorization { reason: reason.into() }
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider base address cannot be parsed as a URL.
	#[error("Provider base address is invalid.")]
	InvalidBaseAddress {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A service path cannot be joined onto the provider base address.
	#[error("Service path `{path}` is invalid.")]
	InvalidServicePath {
		/// Offending service path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Provider-level failures: non-success statuses and malformed payloads.
#[derive(Debug, ThisError)]
pub enum ProviderError {
	/// Provider responded with a non-success HTTP status.
	#[error("Provider returned HTTP status {status}.")]
	Status {
		/// HTTP status code of the response.
		status: u16,
	},
	/// Provider returned malformed JSON that could not be parsed.
	#[error("Provider returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Token endpoint response omitted a required credential field.
	#[error("Token endpoint response is missing `{field}`.")]
	MissingCredential {
		/// Name of the missing form field.
		field: &'static str,
	},
}

/// Transport-level failures (network, IO); the "provider unreachable" class.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The provider did not answer within the configured timeout.
	#[error("Provider call timed out.")]
	Timeout,
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_broker_error_with_source() {
		let store_error = crate::store::StoreError::UnknownToken;
		let broker_error: Error = store_error.into();

		assert!(matches!(broker_error, Error::Storage(_)));

		let source = StdError::source(&broker_error)
			.expect("Broker error should expose the original store error as its source.");

		assert_eq!(source.to_string(), crate::store::StoreError::UnknownToken.to_string());
	}

	#[test]
	fn authorization_helper_carries_reason() {
		let err = Error::authorization("Invalid request token.");

		assert!(matches!(&err, Error::Authorization { reason } if reason == "Invalid request token."));
		assert_eq!(err.to_string(), "Authorization failed: Invalid request token.");
	}
}

//! OAuth 1.0a protocol primitives: parameter encoding, signature base strings, HMAC-SHA1
//! signing, and token-endpoint response parsing.
//!
//! Protocol parameters travel in the `Authorization: OAuth ...` header; application
//! parameters stay in the query string. Both feed the signature base string together with
//! the request method and the base URL (RFC 5849 §3.4.1).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ProviderError,
};

/// RFC 5849 leaves exactly the unreserved set untouched.
const UNRESERVED: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');
const NONCE_LEN: usize = 32;
const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Signs outbound provider requests with consumer credentials and an optional token pair.
#[derive(Clone, Copy)]
pub(crate) struct Signer<'a> {
	consumer_key: &'a str,
	consumer_secret: &'a TokenSecret,
	token: Option<&'a str>,
	token_secret: Option<&'a TokenSecret>,
}
impl<'a> Signer<'a> {
	/// Creates a signer carrying consumer credentials only (anonymous calls, leg 1).
	pub(crate) fn consumer(consumer_key: &'a str, consumer_secret: &'a TokenSecret) -> Self {
		Self { consumer_key, consumer_secret, token: None, token_secret: None }
	}

	/// Attaches a token/secret pair (request token for leg 3, access token for fetches).
	pub(crate) fn with_token(mut self, token: &'a str, token_secret: &'a TokenSecret) -> Self {
		self.token = Some(token);
		self.token_secret = Some(token_secret);

		self
	}

	/// Builds the `Authorization` header value for a request to `url`.
	///
	/// `extra_oauth_params` carries leg-specific protocol parameters such as
	/// `oauth_callback` or `oauth_verifier`; `url`'s query string contributes the
	/// application parameters to the signature.
	pub(crate) fn authorization_header(
		&self,
		method: &str,
		url: &Url,
		extra_oauth_params: &[(&str, &str)],
	) -> String {
		let nonce = nonce();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp().to_string();

		self.authorization_header_at(method, url, extra_oauth_params, &nonce, &timestamp)
	}

	fn authorization_header_at(
		&self,
		method: &str,
		url: &Url,
		extra_oauth_params: &[(&str, &str)],
		nonce: &str,
		timestamp: &str,
	) -> String {
		let mut oauth_params: Vec<(&str, &str)> = vec![
			("oauth_consumer_key", self.consumer_key),
			("oauth_nonce", nonce),
			("oauth_signature_method", SIGNATURE_METHOD),
			("oauth_timestamp", timestamp),
			("oauth_version", OAUTH_VERSION),
		];

		if let Some(token) = self.token {
			oauth_params.push(("oauth_token", token));
		}

		oauth_params.extend(extra_oauth_params.iter().copied());

		let signature = self.signature(method, url, &oauth_params);
		let mut header = String::from("OAuth ");

		for (idx, (key, value)) in oauth_params.iter().enumerate() {
			if idx > 0 {
				header.push_str(", ");
			}

			header.push_str(&format!("{key}=\"{}\"", percent_encode(value)));
		}

		header.push_str(&format!(", oauth_signature=\"{}\"", percent_encode(&signature)));

		header
	}

	fn signature(&self, method: &str, url: &Url, oauth_params: &[(&str, &str)]) -> String {
		let base = signature_base_string(method, url, oauth_params);
		let key = self.consumer_secret.signing_key(self.token_secret);

		hmac_sha1_base64(key.as_bytes(), base.as_bytes())
	}
}

/// Parses a token-endpoint response body (`oauth_token=...&oauth_token_secret=...`).
pub(crate) fn parse_token_response(body: &str) -> Result<(String, TokenSecret), ProviderError> {
	let mut token = None;
	let mut secret = None;

	for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
		match key.as_ref() {
			"oauth_token" => token = Some(value.into_owned()),
			"oauth_token_secret" => secret = Some(value.into_owned()),
			_ => {},
		}
	}

	let token = token.ok_or(ProviderError::MissingCredential { field: "oauth_token" })?;
	let secret =
		secret.ok_or(ProviderError::MissingCredential { field: "oauth_token_secret" })?;

	Ok((token, TokenSecret::new(secret)))
}

fn signature_base_string(method: &str, url: &Url, oauth_params: &[(&str, &str)]) -> String {
	let mut pairs: Vec<(String, String)> = url
		.query_pairs()
		.map(|(key, value)| (percent_encode(&key), percent_encode(&value)))
		.chain(
			oauth_params
				.iter()
				.map(|(key, value)| (percent_encode(key), percent_encode(value))),
		)
		.collect();

	pairs.sort();

	let param_string = pairs
		.iter()
		.map(|(key, value)| format!("{key}={value}"))
		.collect::<Vec<_>>()
		.join("&");
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	format!(
		"{}&{}&{}",
		method.to_uppercase(),
		percent_encode(base_url.as_str()),
		percent_encode(&param_string),
	)
}

pub(crate) fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

fn hmac_sha1_base64(key: &[u8], message: &[u8]) -> String {
	let mut mac = <Hmac<Sha1>>::new_from_slice(key)
		.unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length."));

	mac.update(message);

	STANDARD.encode(mac.finalize().into_bytes())
}

fn nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn percent_encoding_leaves_only_the_unreserved_set() {
		assert_eq!(percent_encode("abcXYZ019-._~"), "abcXYZ019-._~");
		assert_eq!(percent_encode("https://app/cb?x=1 y"), "https%3A%2F%2Fapp%2Fcb%3Fx%3D1%20y");
		assert_eq!(percent_encode("zażółć"), "za%C5%BC%C3%B3%C5%82%C4%87");
	}

	#[test]
	fn hmac_sha1_matches_the_known_vector() {
		// HMAC-SHA1("key", "The quick brown fox jumps over the lazy dog").
		assert_eq!(
			hmac_sha1_base64(b"key", b"The quick brown fox jumps over the lazy dog"),
			"3nybhbi3iqa8ino29wqQcBydtNk=",
		);
	}

	#[test]
	fn base_string_sorts_encoded_pairs_and_strips_the_query() {
		let url = Url::parse(
			"https://api.example.edu/services/oauth/request_token?scopes=email",
		)
		.expect("Fixture URL should parse successfully.");
		let oauth_params = [
			("oauth_consumer_key", "ck"),
			("oauth_nonce", "abc"),
			("oauth_signature_method", "HMAC-SHA1"),
			("oauth_timestamp", "1700000000"),
			("oauth_version", "1.0"),
			("oauth_callback", "https://app/cb"),
		];
		let base = signature_base_string("post", &url, &oauth_params);

		assert_eq!(
			base,
			"POST&https%3A%2F%2Fapi.example.edu%2Fservices%2Foauth%2Frequest_token&\
			oauth_callback%3Dhttps%253A%252F%252Fapp%252Fcb\
			%26oauth_consumer_key%3Dck\
			%26oauth_nonce%3Dabc\
			%26oauth_signature_method%3DHMAC-SHA1\
			%26oauth_timestamp%3D1700000000\
			%26oauth_version%3D1.0\
			%26scopes%3Demail",
		);
	}

	#[test]
	fn authorization_header_carries_protocol_params_and_signature() {
		let url = Url::parse("https://api.example.edu/services/users/user?fields=id")
			.expect("Fixture URL should parse successfully.");
		let consumer_secret = TokenSecret::new("cs");
		let access_token_secret = TokenSecret::new("ats");
		let header = Signer::consumer("ck", &consumer_secret)
			.with_token("at", &access_token_secret)
			.authorization_header_at("POST", &url, &[], "nonce-1", "1700000000");

		assert!(header.starts_with("OAuth oauth_consumer_key=\"ck\""));
		assert!(header.contains("oauth_token=\"at\""));
		assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
		assert!(header.contains("oauth_signature=\""));
		assert!(!header.contains("fields"), "Application parameters must stay out of the header.");

		// HMAC-SHA1 digests are 20 bytes, so the encoded signature ends with a padded `=`.
		assert!(header.ends_with("%3D\""));
	}

	#[test]
	fn token_responses_parse_and_reject_missing_fields() {
		let (token, secret) = parse_token_response("oauth_token=tok&oauth_token_secret=sec")
			.expect("Complete token response should parse successfully.");

		assert_eq!(token, "tok");
		assert_eq!(secret.expose(), "sec");

		let err = parse_token_response("oauth_token=tok")
			.expect_err("Response without a secret should be rejected.");

		assert!(matches!(err, ProviderError::MissingCredential { field: "oauth_token_secret" }));
	}
}

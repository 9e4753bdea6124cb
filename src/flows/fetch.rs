//! Signed and anonymous fetches against the provider's REST service, plus the identity
//! probe built on top of them.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::ProviderError,
	flows::Broker,
	oauth::Signer,
};

impl Broker {
	/// Issues a signed `POST` to `base_address + service_path` with the given query
	/// parameters and an empty body.
	///
	/// Requires an installed authorized session; calling this without one is a caller
	/// contract violation surfaced as [`Error::NotAuthorized`]. Non-success responses are
	/// surfaced as provider errors carrying the HTTP status.
	pub async fn fetch(&self, service_path: &str, params: &[(&str, &str)]) -> Result<Value> {
		let session = self.session.current().ok_or(Error::NotAuthorized)?;
		let signer = self
			.consumer_signer()
			.with_token(&session.access_token, &session.access_token_secret);

		self.dispatch(service_path, params, signer).await
	}

	/// Same contract as [`Broker::fetch`] but signed with consumer credentials only.
	///
	/// Used for service endpoints that do not require a specific authorized identity.
	pub async fn fetch_anonymous(
		&self,
		service_path: &str,
		params: &[(&str, &str)],
	) -> Result<Value> {
		self.dispatch(service_path, params, self.consumer_signer()).await
	}

	/// Checks whether the current session resolves to a non-empty identity.
	///
	/// Convenience liveness check that never surfaces errors: any failure, including a
	/// missing session, reads as `false`.
	pub async fn probe_identity(&self) -> bool {
		match self.fetch(self.descriptor.current_user_path(), &[]).await {
			Ok(identity) => identity_is_present(&identity),
			Err(_) => false,
		}
	}

	async fn dispatch(
		&self,
		service_path: &str,
		params: &[(&str, &str)],
		signer: Signer<'_>,
	) -> Result<Value> {
		let mut url = self.descriptor.service_url(service_path)?;

		if !params.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in params {
				pairs.append_pair(key, value);
			}

			drop(pairs);
		}

		let header = signer.authorization_header("POST", &url, &[]);
		let response = self.http_client.post_signed(url, &header).await?;

		if !response.is_success() {
			return Err(ProviderError::Status { status: response.status }.into());
		}

		parse_json(&response.body, response.status)
	}
}

// An empty-string or zero id is a placeholder identity, not an authorized one.
fn identity_is_present(identity: &Value) -> bool {
	match identity.get("id") {
		Some(Value::String(id)) => !id.is_empty(),
		Some(Value::Number(id)) => id.as_f64().is_some_and(|value| value != 0.0),
		_ => false,
	}
}

fn parse_json(body: &str, status: u16) -> Result<Value> {
	let mut deserializer = serde_json::Deserializer::from_str(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProviderError::ResponseParse { source, status }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn malformed_json_maps_to_a_provider_error() {
		let err = parse_json("{not json", 200).expect_err("Malformed body should be rejected.");

		assert!(matches!(
			err,
			Error::Provider(ProviderError::ResponseParse { status: 200, .. }),
		));
	}

	#[test]
	fn identity_presence_follows_the_id_field() {
		assert!(identity_is_present(&serde_json::json!({ "id": "1024" })));
		assert!(identity_is_present(&serde_json::json!({ "id": 7 })));
		assert!(!identity_is_present(&serde_json::json!({ "id": "" })));
		assert!(!identity_is_present(&serde_json::json!({ "id": 0 })));
		assert!(!identity_is_present(&serde_json::json!({ "id": null })));
		assert!(!identity_is_present(&serde_json::json!({})));
	}

	#[test]
	fn valid_json_parses_to_a_value() {
		let value =
			parse_json("{\"id\":\"42\"}", 200).expect("Valid body should parse successfully.");

		assert_eq!(value.get("id").and_then(Value::as_str), Some("42"));
	}
}

//! The single authorized session and its thread-safe holder.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// A completed, user-approved authorization: the long-lived OAuth 1.0a credential pair.
///
/// At most one instance is live per broker. It is replaced wholesale by a subsequent
/// authorization or resume and is never partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedSession {
	/// Long-lived access token identifying the approved authorization.
	pub access_token: String,
	/// Secret paired with the access token, used for request signing.
	pub access_token_secret: TokenSecret,
}
impl AuthorizedSession {
	/// Builds a session from an access token/secret pair.
	pub fn new(access_token: impl Into<String>, access_token_secret: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			access_token_secret: TokenSecret::new(access_token_secret),
		}
	}
}

/// Shared cell holding the broker's current authorized session.
///
/// Reads and replacements go through a [`RwLock`] so a signed fetch never observes a
/// half-written credential pair. The single-session constraint is inherited from the
/// source system: the broker represents one authorized identity at a time, not one per
/// end user.
#[derive(Clone, Debug, Default)]
pub struct SessionHolder(Arc<RwLock<Option<AuthorizedSession>>>);
impl SessionHolder {
	/// Replaces the current session wholesale.
	pub fn install(&self, session: AuthorizedSession) {
		*self.0.write() = Some(session);
	}

	/// Returns a clone of the live credential pair, or none if never authorized.
	pub fn current(&self) -> Option<AuthorizedSession> {
		self.0.read().clone()
	}

	/// Removes and returns the current session, if any.
	pub fn clear(&self) -> Option<AuthorizedSession> {
		self.0.write().take()
	}

	/// Checks whether a session is currently installed.
	pub fn is_installed(&self) -> bool {
		self.0.read().is_some()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn install_replaces_the_pair_wholesale() {
		let holder = SessionHolder::default();

		assert!(holder.current().is_none());
		assert!(!holder.is_installed());

		holder.install(AuthorizedSession::new("at-1", "ats-1"));

		let first = holder.current().expect("First session should be installed.");

		assert_eq!(first.access_token, "at-1");
		assert_eq!(first.access_token_secret.expose(), "ats-1");

		holder.install(AuthorizedSession::new("at-2", "ats-2"));

		let second = holder.current().expect("Second session should replace the first.");

		assert_eq!(second.access_token, "at-2");
		assert_eq!(second.access_token_secret.expose(), "ats-2");
	}

	#[test]
	fn clear_returns_the_previous_session() {
		let holder = SessionHolder::default();

		holder.install(AuthorizedSession::new("at", "ats"));

		let removed = holder.clear().expect("Clearing should return the installed session.");

		assert_eq!(removed.access_token, "at");
		assert!(holder.current().is_none());
		assert!(holder.clear().is_none());
	}
}

//! OAuth 1.0a session broker—pending request-token stores, single-session three-legged
//! handshakes, and signed provider fetches in one crate.
//!
//! The broker talks to one fixed provider (base address + consumer key/secret) and holds at
//! most one authorized session at a time. Pending request tokens live in a shared
//! [`store::PendingStore`] until they are exchanged or evicted by the background
//! [`sweeper::ExpirySweeper`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod provider;
pub mod store;
pub mod sweeper;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;

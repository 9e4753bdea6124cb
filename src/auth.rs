//! Auth-domain models: pending authorizations, the authorized session, and secrets.

pub mod pending;
pub mod secret;
pub mod session;

pub use pending::*;
pub use secret::*;
pub use session::*;

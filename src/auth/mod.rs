//! Authentication module
//!
//! The Hypothesis API authenticates with a developer API key sent as a
//! bearer token. `Credentials` carries the key together with the
//! username and authority used to build account ids.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Credentials};

#[cfg(test)]
mod tests;

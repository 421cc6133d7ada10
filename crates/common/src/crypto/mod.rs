//! Secret key handling for Zap
//!
//! The service keeps exactly one secret on disk: a hex string created on first
//! run and read verbatim on every later start. It is used to sign the cookie
//! that carries flash messages between a redirect and the page that shows them.

mod keys;

pub use keys::{KeyError, SecretKey, SECRET_KEY_SIZE, SIGNING_KEY_SIZE};

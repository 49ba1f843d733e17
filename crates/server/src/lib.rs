//! NLG endpoint server: one-route axum app over a once-loaded domain.
//!
//! Lifecycle:
//! 1. Load the domain (done by the caller)
//! 2. Build the generator and shared app state
//! 3. Bind the listener (plain TCP, or TLS when key/cert are given)
//! 4. Serve `/nlg` until shutdown
//!
//! Domain parsing, tracker replay and template rendering live in their own
//! crates; this one only marshals HTTP in and out.

pub mod request;
pub mod server;
pub mod state;
#[cfg(feature = "tls")]
pub mod tls;

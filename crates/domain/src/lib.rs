//! Dialogue domain: the YAML-backed description of slots and response
//! templates an assistant can draw on. Loaded once at startup and shared
//! read-only with the request handlers.

pub mod loader;
pub mod schema;

pub use {
    loader::load_domain,
    schema::{Domain, ResponseTemplate, SlotDefinition},
};

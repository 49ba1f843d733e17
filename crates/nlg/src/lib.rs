//! Templated natural-language generation.
//!
//! Rendering a response is three steps: pick the variations admissible for
//! the requested channel, choose one at random, and fill its `{slot}`
//! placeholders from the conversation state and the caller's arguments.

pub mod generator;
pub mod interpolate;

pub use {generator::TemplatedGenerator, interpolate::interpolate_text};

//! Client for the external Cre8 inference service.
//!
//! The upstream service accepts the same logical request in different wire
//! encodings depending on the endpoint, and replies with JSON, raw binary,
//! or mislabeled text for semantically similar calls. This crate isolates
//! that inconsistency from the rest of the system:
//!
//! - [`encode`] plans the outbound attempt sequence for a request
//!   (which endpoint, which body encoding, which fallback order),
//! - [`client`] executes the attempts strictly in order over HTTP,
//! - [`classify`] normalizes whatever comes back into a single
//!   [`GenerationResult`].

pub mod classify;
pub mod client;
pub mod encode;
pub mod error;
pub mod result;

pub use client::InferenceClient;
pub use error::InferenceError;
pub use result::GenerationResult;

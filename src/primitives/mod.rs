//! Core cryptographic primitives for the Schnorr NIZK.
//!
//! - **group**: validated parameters and the shared arithmetic context
//! - **groups**: published RFC 5114 presets and test data
//! - **rng**: secure randomness
//! - **transcript**: Fiat-Shamir bind string and challenge derivation

/// Group parameters and arithmetic context.
pub mod group;
/// Published group presets.
pub mod groups;
/// Cryptographically secure random number generation.
pub mod rng;
/// Transcript for Fiat-Shamir transform.
pub mod transcript;

pub use group::{GroupContext, GroupParameters};
pub use groups::{Rfc5114Group, TestVector};
pub use rng::SecureRng;
pub use transcript::Transcript;

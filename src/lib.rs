//! Non-interactive Schnorr proof of knowledge of a discrete logarithm.
//!
//! A prover convinces a verifier that it knows `x` with `y = g^x mod p` in a
//! prime-order subgroup of `Z_p^*`, without revealing `x`. The interactive
//! challenge is replaced by SHA-256 over a transcript binding the generator,
//! the commitment, the public value, a prover-chosen identifier and
//! server-supplied "other info" such as a TLS certificate.
//!
//! # Example
//!
//! ```rust
//! use schnorr_nizk::{GroupContext, Prover, SecureRng, Verifier, Witness};
//!
//! let ctx = GroupContext::rfc5114_1024_160();
//! let mut rng = SecureRng::new();
//!
//! let mut prover = Prover::new(&ctx, Witness::Fresh, &mut rng).unwrap();
//! let transcript = prover.transcript("node-7", b"-----BEGIN CERTIFICATE-----");
//! prover.compute_response(transcript.as_bytes()).unwrap();
//! let message = prover.to_message("node-7").unwrap();
//!
//! let accepted = Verifier::new(&ctx)
//!     .verify_message(&message, b"-----BEGIN CERTIFICATE-----")
//!     .unwrap();
//! assert!(accepted);
//! ```

mod error;

/// Group arithmetic, presets, randomness and transcripts.
pub mod primitives;

/// Prover, verifier and the proof message.
pub mod protocol;

/// Configuration and verification endpoints.
pub mod server;

/// Generated gRPC types.
#[cfg(feature = "grpc")]
#[allow(missing_docs)]
pub mod proto {
    tonic::include_proto!("nizk");
}

pub use error::Error;
pub use num_bigint::BigUint;
pub use primitives::{
    GroupContext, GroupParameters, Rfc5114Group, SecureRng, TestVector, Transcript,
};
pub use protocol::{ProofMessage, Prover, ProverPhase, Verifier, Witness};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Proof message exchanged between the parties.
pub mod message;
/// Prover implementation for generating proofs.
pub mod prover;
/// Verifier implementation for validating proofs.
pub mod verifier;

pub use message::ProofMessage;
pub use prover::{Prover, ProverPhase, Witness};
pub use verifier::Verifier;

pub use crate::primitives::Transcript;

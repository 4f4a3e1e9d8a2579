//! Error types for the Schnorr NIZK engine and its boundary layers.

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Group parameters violate `1 < g < p`, `q | p - 1` or `g^q = 1 mod p`.
    #[error("Invalid group parameters: {0}")]
    InvalidGroupParameters(String),

    /// A caller-supplied secret is outside `[0, q - 1]`.
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),

    /// The prover has already produced its response.
    #[error("Response already computed for this prover")]
    AlreadyResponded,

    /// Verification was attempted before a challenge was bound.
    #[error("No challenge bound: call compute_challenge before verify")]
    MissingChallenge,

    /// A challenge is already bound to this verifier.
    #[error("Challenge already bound for this verifier")]
    ChallengeAlreadyBound,

    /// A proof message was requested before the response was computed.
    #[error("Response not computed yet")]
    MissingResponse,

    /// An inbound proof message has missing or non-integer fields.
    #[error("Malformed proof message: {0}")]
    MalformedMessage(String),

    /// Encoding or decoding failed at the boundary.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The server-bound other-info could not be obtained.
    #[error("Other info unavailable: {0}")]
    OtherInfoUnavailable(String),

    /// The operating system randomness source failed.
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

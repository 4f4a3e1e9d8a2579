//! Common test utilities shared across integration tests.

use schnorr_nizk::{GroupContext, ProofMessage, Prover, SecureRng, Witness};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("schnorr_nizk=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Runs the full prover flow and returns the message to send.
#[allow(dead_code)]
pub fn prove(
    ctx: &GroupContext,
    witness: Witness,
    identifier: &str,
    other_info: &[u8],
) -> ProofMessage {
    let mut rng = SecureRng::new();
    let mut prover = Prover::new(ctx, witness, &mut rng).expect("Prover creation should succeed");
    let transcript = prover.transcript(identifier, other_info);
    prover
        .compute_response(transcript.as_bytes())
        .expect("First response should succeed");
    prover
        .to_message(identifier)
        .expect("Message should be available after response")
}

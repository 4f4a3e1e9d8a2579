//! Basic usage of the non-interactive Schnorr proof.
//!
//! A node proves knowledge of its secret to a server, binding the proof to
//! the server's certificate so it cannot be replayed elsewhere.

use schnorr_nizk::{GroupContext, ProofMessage, Prover, SecureRng, Verifier, Witness};

const SERVER_CERT: &[u8] = b"-----BEGIN CERTIFICATE-----\nMIIBdemo\n-----END CERTIFICATE-----\n";

fn main() {
    println!("Schnorr NIZK: Basic Example\n");

    println!("Step 1: Initialize group context and RNG");
    let ctx = GroupContext::rfc5114_1024_160();
    let mut rng = SecureRng::new();
    println!("  Using RFC 5114 1024-bit MODP group with 160-bit subgroup\n");

    println!("Step 2: Prover draws x and r, computes y = g^x and a = g^r");
    let mut prover =
        Prover::new(&ctx, Witness::Fresh, &mut rng).expect("Prover creation should succeed");
    println!("  Public value y has {} bits\n", prover.public_value().bits());

    println!("Step 3: Bind g, a, y, identifier and the server certificate");
    let identifier = "demo-node";
    let transcript = prover.transcript(identifier, SERVER_CERT);
    println!("  Transcript is {} bytes\n", transcript.as_bytes().len());

    println!("Step 4: Derive c = SHA-256(transcript) and z = (r - x*c) mod q");
    prover
        .compute_response(transcript.as_bytes())
        .expect("First response should succeed");
    let json = prover
        .to_message(identifier)
        .and_then(|m| m.to_json())
        .expect("Message encoding should succeed");
    println!("  Proof message: {json}\n");

    println!("Step 5: Server decodes the message and verifies a == g^z * y^c");
    let message = ProofMessage::from_json(json.as_bytes()).expect("Decoding should succeed");
    match Verifier::new(&ctx).verify_message(&message, SERVER_CERT) {
        Ok(true) => println!("  Proof is VALID"),
        Ok(false) => println!("  Proof is INVALID"),
        Err(e) => println!("  Verification error: {e}"),
    }

    println!("\nStep 6: The same proof presented to a different server");
    let replayed = Verifier::new(&ctx)
        .verify_message(&message, b"-----BEGIN CERTIFICATE-----\nother\n")
        .expect("Verification should complete");
    println!("  Accepted elsewhere: {replayed}");
}

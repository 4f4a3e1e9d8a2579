#![no_main]

use libfuzzer_sys::fuzz_target;
use schnorr_nizk::{GroupContext, ProofMessage, Verifier};

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = ProofMessage::from_json(data) {
        let ctx = GroupContext::rfc5114_1024_160();
        let _ = Verifier::new(&ctx).verify_message(&message, b"fuzz");
    }
});

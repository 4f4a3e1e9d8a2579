mod common;

use proptest::prelude::*;
use schnorr_nizk::{
    BigUint, GroupContext, GroupParameters, Prover, SecureRng, Transcript, Verifier, Witness,
};

fn small_context() -> GroupContext {
    // p = 2q + 1 with q = 1019; g = 4 generates the order-q subgroup.
    GroupContext::new(
        GroupParameters::new(2039u32.into(), 1019u32.into(), 4u32.into())
            .expect("Safe-prime group should validate"),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proof_verifies_for_any_pinned_secret(
        x in 0u32..1019,
        identifier in "[a-z0-9-]{1,32}",
        other_info in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        let ctx = small_context();
        let message = common::prove(&ctx, Witness::Pinned(x.into()), &identifier, &other_info);

        let accepted = Verifier::new(&ctx)
            .verify_message(&message, &other_info)
            .expect("Verification should complete");
        prop_assert!(accepted, "Honest proof must verify");
    }

    #[test]
    fn response_is_reduced(x in 0u32..1019) {
        let ctx = small_context();
        let mut rng = SecureRng::new();
        let mut prover = Prover::new(&ctx, Witness::Pinned(x.into()), &mut rng).unwrap();

        let transcript = prover.transcript("node", b"info");
        let z = prover.compute_response(transcript.as_bytes()).unwrap();
        prop_assert!(&z < ctx.q());
        prop_assert!(prover.commitment() < ctx.p());
    }

    #[test]
    fn challenge_is_deterministic(
        a in 1u32..2039,
        y in 1u32..2039,
        identifier in ".{0,16}",
        other_info in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let ctx = small_context();
        let a = BigUint::from(a);
        let y = BigUint::from(y);

        let first = Transcript::bind(ctx.g(), &a, &y, &identifier, &other_info);
        let second = Transcript::bind(ctx.g(), &a, &y, &identifier, &other_info);
        prop_assert_eq!(first.challenge(), second.challenge());
    }
}

#[test]
fn rfc5114_2048_proof_verifies() {
    let ctx = GroupContext::rfc5114_2048_256();
    let message = common::prove(&ctx, Witness::Fresh, "node-2048", b"cert");
    assert!(Verifier::new(&ctx).verify_message(&message, b"cert").unwrap());
}

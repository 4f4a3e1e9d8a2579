//! Fiat-Shamir transcript binding.
//!
//! The bind string is the concatenation, without delimiters, of
//! `decimal(g) || decimal(a) || decimal(y) || identifier || other_info`.
//! Prover and verifier must build it byte for byte identically, so this is a
//! wire-format contract rather than an implementation detail.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Byte string hashed by both parties to derive the challenge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transcript(Vec<u8>);

impl Transcript {
    /// Binds generator, commitment, public value and session context.
    ///
    /// `other_info` is opaque server-bound material (for instance a PEM
    /// certificate) and is appended verbatim.
    pub fn bind(
        generator: &BigUint,
        commitment: &BigUint,
        public_value: &BigUint,
        identifier: &str,
        other_info: &[u8],
    ) -> Self {
        let g = generator.to_str_radix(10);
        let a = commitment.to_str_radix(10);
        let y = public_value.to_str_radix(10);

        let mut bytes =
            Vec::with_capacity(g.len() + a.len() + y.len() + identifier.len() + other_info.len());
        bytes.extend_from_slice(g.as_bytes());
        bytes.extend_from_slice(a.as_bytes());
        bytes.extend_from_slice(y.as_bytes());
        bytes.extend_from_slice(identifier.as_bytes());
        bytes.extend_from_slice(other_info);

        Self(bytes)
    }

    /// Returns the bound bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the transcript, returning the bound bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Derives the challenge for this transcript.
    pub fn challenge(&self) -> BigUint {
        challenge_from_bytes(&self.0)
    }
}

impl AsRef<[u8]> for Transcript {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// SHA-256 of `bytes` as a big-endian unsigned integer.
pub(crate) fn challenge_from_bytes(bytes: &[u8]) -> BigUint {
    let digest = Sha256::digest(bytes);
    BigUint::from_bytes_be(&digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_concatenates_in_order() {
        let transcript = Transcript::bind(
            &BigUint::from(4u32),
            &BigUint::from(18u32),
            &BigUint::from(2u32),
            "node-7",
            b"-----BEGIN CERTIFICATE-----",
        );
        assert_eq!(
            transcript.as_bytes(),
            b"4182node-7-----BEGIN CERTIFICATE-----"
        );
    }

    #[test]
    fn challenge_deterministic() {
        let t1 = Transcript::bind(&4u32.into(), &8u32.into(), &2u32.into(), "id", b"info");
        let t2 = Transcript::bind(&4u32.into(), &8u32.into(), &2u32.into(), "id", b"info");
        assert_eq!(t1.challenge(), t2.challenge());
        assert_eq!(
            t1.challenge(),
            BigUint::parse_bytes(
                b"73088567688049093215884215084526926953370726049922773275838338740491406396778",
                10
            )
            .unwrap()
        );
    }

    #[test]
    fn challenge_different_inputs() {
        let t1 = Transcript::bind(&4u32.into(), &8u32.into(), &2u32.into(), "id", b"info");
        let t2 = Transcript::bind(&4u32.into(), &8u32.into(), &2u32.into(), "id", b"inf0");
        assert_ne!(t1.challenge(), t2.challenge());
    }
}

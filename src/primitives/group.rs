//! Group parameters and the shared arithmetic context.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use super::groups::Rfc5114Group;
use super::transcript::challenge_from_bytes;
use crate::{Error, Result};

/// Public parameters `(p, q, g)` of a prime-order subgroup of `Z_p^*`.
///
/// Construction validates `p > 2`, `q > 0`, `q | p - 1`, `1 < g < p` and
/// `g^q = 1 mod p`, so a value of this type always describes a usable group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroupParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl GroupParameters {
    /// Validates and wraps the modulus `p`, subgroup order `q` and generator `g`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupParameters`] if any invariant is violated.
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self> {
        let one = BigUint::from(1u32);

        if p <= BigUint::from(2u32) {
            return Err(Error::InvalidGroupParameters(
                "Modulus p must be greater than 2".to_string(),
            ));
        }

        if q.bits() == 0 {
            return Err(Error::InvalidGroupParameters(
                "Subgroup order q cannot be zero".to_string(),
            ));
        }

        if g <= one {
            return Err(Error::InvalidGroupParameters(
                "Generator g must be greater than 1".to_string(),
            ));
        }

        if g >= p {
            return Err(Error::InvalidGroupParameters(
                "Generator g must be less than p".to_string(),
            ));
        }

        if ((&p - 1u32) % &q).bits() != 0 {
            return Err(Error::InvalidGroupParameters(
                "Subgroup order q must divide p - 1".to_string(),
            ));
        }

        if g.modpow(&q, &p) != one {
            return Err(Error::InvalidGroupParameters(
                "Generator g does not have order q".to_string(),
            ));
        }

        Ok(Self { p, q, g })
    }

    /// Parses hex-encoded `p`, `q` and `g`. Whitespace inside the strings is ignored.
    pub fn from_hex(p: &str, q: &str, g: &str) -> Result<Self> {
        Self::new(parse_hex("p", p)?, parse_hex("q", q)?, parse_hex("g", g)?)
    }

    /// Parses decimal `p`, `q` and `g`, as reported by a remote verifier.
    pub fn from_decimal(p: &str, q: &str, g: &str) -> Result<Self> {
        Self::new(
            parse_decimal("p", p)?,
            parse_decimal("q", q)?,
            parse_decimal("g", g)?,
        )
    }

    /// Returns the modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }
}

fn parse_hex(name: &str, value: &str) -> Result<BigUint> {
    let mut digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }
    let bytes = hex::decode(&digits).map_err(|e| {
        Error::InvalidGroupParameters(format!("Parameter {name} is not valid hex: {e}"))
    })?;
    if bytes.is_empty() {
        return Err(Error::InvalidGroupParameters(format!(
            "Parameter {name} is empty"
        )));
    }
    Ok(BigUint::from_bytes_be(&bytes))
}

fn parse_decimal(name: &str, value: &str) -> Result<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidGroupParameters(format!(
            "Parameter {name} is not a decimal integer"
        )));
    }
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        Error::InvalidGroupParameters(format!("Parameter {name} is not a decimal integer"))
    })
}

/// Immutable group context shared by every prover and verifier.
///
/// Holds validated [`GroupParameters`] and provides the primitive operations of
/// the protocol. It has no interior mutability and can be shared across
/// threads behind a reference or an `Arc`.
#[derive(Clone, Debug)]
pub struct GroupContext {
    params: GroupParameters,
    exponent_bytes: usize,
    top_mask: u8,
}

impl GroupContext {
    /// Creates a context from validated parameters.
    pub fn new(params: GroupParameters) -> Self {
        let bits = params.q.bits();
        let exponent_bytes = bits.div_ceil(8) as usize;
        let excess_bits = exponent_bytes as u64 * 8 - bits;
        let top_mask = 0xFFu8 >> excess_bits;

        Self {
            params,
            exponent_bytes,
            top_mask,
        }
    }

    /// Context over the RFC 5114 1024-bit MODP group with 160-bit subgroup.
    pub fn rfc5114_1024_160() -> Self {
        Self::new(Rfc5114Group::Modp1024Sub160.parameters())
    }

    /// Context over the RFC 5114 2048-bit MODP group with 256-bit subgroup.
    pub fn rfc5114_2048_256() -> Self {
        Self::new(Rfc5114Group::Modp2048Sub256.parameters())
    }

    /// Returns the underlying parameters.
    pub fn parameters(&self) -> &GroupParameters {
        &self.params
    }

    /// Returns the modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.params.p
    }

    /// Returns the subgroup order `q`.
    pub fn q(&self) -> &BigUint {
        &self.params.q
    }

    /// Returns the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.params.g
    }

    /// Computes `base^exponent mod p` by square-and-multiply.
    pub fn modexp(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.params.p)
    }

    /// Computes the public value `g^x mod p`.
    pub fn public_value(&self, x: &BigUint) -> BigUint {
        self.modexp(&self.params.g, x)
    }

    /// Returns true if `value` lies in the exponent range `[0, q - 1]`.
    pub fn is_exponent(&self, value: &BigUint) -> bool {
        value < &self.params.q
    }

    /// Returns true if `value` lies in `[1, p - 1]`.
    pub fn is_residue(&self, value: &BigUint) -> bool {
        value.bits() != 0 && value < &self.params.p
    }

    /// Returns true if `value` is an element of the order-`q` subgroup.
    pub fn is_element(&self, value: &BigUint) -> bool {
        self.is_residue(value) && self.modexp(value, &self.params.q) == BigUint::from(1u32)
    }

    /// Draws an exponent uniformly from `[0, q - 1]`.
    ///
    /// Fills just enough bytes to cover `q`, clears the bits above the bit
    /// length of `q` and rejects candidates `>= q`. Each attempt succeeds with
    /// probability above one half.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomnessUnavailable`] if the generator fails.
    pub fn random_exponent<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        let mut buf = vec![0u8; self.exponent_bytes];

        loop {
            rng.try_fill_bytes(&mut buf)
                .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
            buf[0] &= self.top_mask;

            let candidate = BigUint::from_bytes_be(&buf);
            if candidate < self.params.q {
                return Ok(candidate);
            }
        }
    }

    /// Hashes transcript bytes into the challenge integer.
    ///
    /// The SHA-256 digest is read as a big-endian integer and is not reduced
    /// modulo `q`; prover and verifier both use the full value.
    pub fn challenge_from_transcript(&self, transcript: &[u8]) -> BigUint {
        challenge_from_bytes(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecureRng;

    fn small_params() -> GroupParameters {
        GroupParameters::new(23u32.into(), 11u32.into(), 4u32.into()).unwrap()
    }

    #[test]
    fn rejects_zero_order() {
        let err = GroupParameters::new(23u32.into(), 0u32.into(), 4u32.into()).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupParameters(_)));
    }

    #[test]
    fn rejects_generator_out_of_range() {
        for g in [0u32, 1, 23, 30] {
            let err = GroupParameters::new(23u32.into(), 11u32.into(), g.into()).unwrap_err();
            assert!(matches!(err, Error::InvalidGroupParameters(_)), "g = {g}");
        }
    }

    #[test]
    fn rejects_order_not_dividing_modulus() {
        let err = GroupParameters::new(23u32.into(), 7u32.into(), 4u32.into()).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupParameters(_)));
    }

    #[test]
    fn rejects_generator_of_wrong_order() {
        // 5 generates all of Z_23^*, order 22.
        let err = GroupParameters::new(23u32.into(), 11u32.into(), 5u32.into()).unwrap_err();
        assert!(matches!(err, Error::InvalidGroupParameters(_)));
    }

    #[test]
    fn parses_spaced_hex() {
        let params = GroupParameters::from_hex("17", "0B", "0 4").unwrap();
        assert_eq!(params, small_params());
        assert!(GroupParameters::from_hex("zz", "0B", "04").is_err());
    }

    #[test]
    fn modexp_small_group() {
        let ctx = GroupContext::new(small_params());
        assert_eq!(ctx.public_value(&6u32.into()), BigUint::from(2u32));
        assert_eq!(ctx.public_value(&7u32.into()), BigUint::from(8u32));
        assert_eq!(ctx.modexp(&9u32.into(), &6u32.into()), BigUint::from(3u32));
    }

    #[test]
    fn random_exponent_stays_below_order() {
        let ctx = GroupContext::new(small_params());
        let mut rng = SecureRng::new();
        let mut seen = [false; 11];

        for _ in 0..2000 {
            let value = ctx.random_exponent(&mut rng).unwrap();
            assert!(ctx.is_exponent(&value));
            let digits = value.to_u32_digits();
            seen[digits.first().copied().unwrap_or(0) as usize] = true;
        }

        assert!(seen.iter().all(|s| *s), "every residue should appear");
    }

    #[test]
    fn random_exponent_rfc5114() {
        let ctx = GroupContext::rfc5114_1024_160();
        let mut rng = SecureRng::new();
        let a = ctx.random_exponent(&mut rng).unwrap();
        let b = ctx.random_exponent(&mut rng).unwrap();
        assert!(ctx.is_exponent(&a));
        assert!(ctx.is_exponent(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn challenge_is_unreduced_sha256() {
        let ctx = GroupContext::rfc5114_1024_160();
        let expected = BigUint::parse_bytes(
            b"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            16,
        )
        .unwrap();
        let challenge = ctx.challenge_from_transcript(b"abc");
        assert_eq!(challenge, expected);
        assert!(challenge > *ctx.q());
    }

    #[test]
    fn subgroup_membership() {
        let ctx = GroupContext::new(small_params());

        // Squares mod 23 form the order-11 subgroup.
        for v in [1u32, 2, 3, 4, 6, 8, 9, 12, 13, 16, 18] {
            assert!(ctx.is_element(&v.into()), "{v} is a square");
        }
        for v in [0u32, 5, 22, 23, 46] {
            assert!(!ctx.is_element(&v.into()), "{v} is not in the subgroup");
        }

        assert!(ctx.is_residue(&22u32.into()));
        assert!(!ctx.is_residue(&0u32.into()));
        assert!(!ctx.is_residue(&23u32.into()));
    }

    #[test]
    fn parameters_from_decimal() {
        let params = GroupParameters::from_decimal("23", "11", "4").unwrap();
        assert_eq!(params, small_params());

        let ctx = GroupContext::rfc5114_2048_256();
        let reparsed = GroupParameters::from_decimal(
            &ctx.p().to_string(),
            &ctx.q().to_string(),
            &ctx.g().to_string(),
        )
        .unwrap();
        assert_eq!(&reparsed, ctx.parameters());

        for bad in ["", "0x17", "-23", "2 3"] {
            assert!(matches!(
                GroupParameters::from_decimal(bad, "11", "4"),
                Err(Error::InvalidGroupParameters(_))
            ));
        }
    }
}

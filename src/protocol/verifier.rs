use num_bigint::BigUint;

use super::{ProofMessage, Transcript};
use crate::{Error, GroupContext, Result};

/// Verifier for the non-interactive Schnorr protocol.
///
/// Checks `a == g^z * y^c mod p`, where `c` is derived from the same
/// transcript the prover hashed. A verifier holds the challenge of exactly one
/// proof; servers build one per request and never share it.
#[derive(Debug)]
pub struct Verifier<'g> {
    context: &'g GroupContext,
    challenge: Option<BigUint>,
}

impl<'g> Verifier<'g> {
    /// Creates a verifier with no challenge bound.
    pub fn new(context: &'g GroupContext) -> Self {
        Self {
            context,
            challenge: None,
        }
    }

    /// Derives and stores the challenge for `transcript`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChallengeAlreadyBound`] if a challenge is already bound.
    pub fn compute_challenge(&mut self, transcript: &[u8]) -> Result<()> {
        if self.challenge.is_some() {
            return Err(Error::ChallengeAlreadyBound);
        }
        self.challenge = Some(self.context.challenge_from_transcript(transcript));
        Ok(())
    }

    /// Returns the bound challenge, if any.
    pub fn challenge(&self) -> Option<&BigUint> {
        self.challenge.as_ref()
    }

    /// Checks the verification equation for `(y, a, z)`.
    ///
    /// `y` must be a subgroup element, `a` must lie in `[1, p - 1]` and `z` in
    /// `[0, q - 1]`; anything else is rejected before the equation is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingChallenge`] if [`Verifier::compute_challenge`]
    /// has not been called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use schnorr_nizk::{BigUint, Error, GroupContext, Verifier};
    ///
    /// let ctx = GroupContext::rfc5114_1024_160();
    /// let verifier = Verifier::new(&ctx);
    /// let one = BigUint::from(1u32);
    /// assert!(matches!(
    ///     verifier.verify(&one, &one, &one),
    ///     Err(Error::MissingChallenge)
    /// ));
    /// ```
    pub fn verify(&self, y: &BigUint, a: &BigUint, z: &BigUint) -> Result<bool> {
        let challenge = self.challenge.as_ref().ok_or(Error::MissingChallenge)?;
        let p = self.context.p();

        if !self.context.is_element(y)
            || !self.context.is_residue(a)
            || !self.context.is_exponent(z)
        {
            return Ok(false);
        }

        let g_z = self.context.public_value(z);
        let y_c = self.context.modexp(y, challenge);
        let rhs = (g_z * y_c) % p;

        Ok(*a == rhs)
    }

    /// Rebuilds the transcript for `message` under `other_info` and verifies it.
    ///
    /// Consumes the verifier so a bound challenge cannot be reused.
    pub fn verify_message(mut self, message: &ProofMessage, other_info: &[u8]) -> Result<bool> {
        let transcript = Transcript::bind(
            self.context.g(),
            message.a(),
            message.y(),
            message.identifier(),
            other_info,
        );
        self.compute_challenge(transcript.as_bytes())?;
        self.verify(message.y(), message.a(), message.z())
    }
}

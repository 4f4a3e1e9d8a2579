use core::fmt;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use super::{ProofMessage, Transcript};
use crate::{Error, GroupContext, Result};

/// Source of the prover's secret exponent.
///
/// The caller states explicitly whether an identity is pinned or a throwaway
/// secret should be drawn; an invalid pinned secret is an error, never a
/// silent switch to a random one.
#[derive(Clone)]
pub enum Witness {
    /// Use this secret `x`. Must lie in `[0, q - 1]`.
    Pinned(BigUint),
    /// Draw a fresh secret, for one-shot or simulated proofs.
    Fresh,
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pinned(_) => f.write_str("Witness::Pinned(<redacted>)"),
            Self::Fresh => f.write_str("Witness::Fresh"),
        }
    }
}

/// Observable lifecycle of a [`Prover`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProverPhase {
    /// `y` and `a` are available; no response yet.
    CommitmentReady,
    /// The response has been computed. Terminal.
    ResponseReady,
}

enum State {
    CommitmentReady { x: BigUint, r: BigUint },
    ResponseReady { challenge: BigUint, response: BigUint },
}

/// Prover for the non-interactive Schnorr protocol.
///
/// Demonstrates knowledge of `x` with `y = g^x mod p` without revealing `x`.
/// Each instance draws its own nonce `r` and answers exactly one challenge;
/// build a new prover for every proof.
///
/// # Security
///
/// - Always use [`SecureRng`](crate::SecureRng) or another CSPRNG
/// - Bind the transcript to an identifier and fresh server-bound other-info
/// - `x` and `r` are dropped as soon as the response is computed
pub struct Prover<'g> {
    context: &'g GroupContext,
    public_value: BigUint,
    commitment: BigUint,
    state: State,
}

impl<'g> Prover<'g> {
    /// Creates a prover and computes its public value and commitment.
    ///
    /// `y = g^x mod p` and `a = g^r mod p` for a freshly drawn `r`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecret`] if a pinned secret is not below `q`,
    /// and [`Error::RandomnessUnavailable`] if the generator fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use schnorr_nizk::{GroupContext, Prover, SecureRng, Witness};
    ///
    /// let ctx = GroupContext::rfc5114_1024_160();
    /// let mut rng = SecureRng::new();
    /// let prover = Prover::new(&ctx, Witness::Fresh, &mut rng).unwrap();
    /// assert!(prover.commitment() < ctx.p());
    /// ```
    pub fn new<R: RngCore + CryptoRng>(
        context: &'g GroupContext,
        witness: Witness,
        rng: &mut R,
    ) -> Result<Self> {
        let x = match witness {
            Witness::Pinned(x) => {
                if !context.is_exponent(&x) {
                    return Err(Error::InvalidSecret(
                        "Secret must be less than the subgroup order q".to_string(),
                    ));
                }
                x
            }
            Witness::Fresh => context.random_exponent(rng)?,
        };
        let r = context.random_exponent(rng)?;

        let commitment = context.public_value(&r);
        let public_value = context.public_value(&x);

        Ok(Self {
            context,
            public_value,
            commitment,
            state: State::CommitmentReady { x, r },
        })
    }

    /// Returns the public value `y = g^x mod p`.
    pub fn public_value(&self) -> &BigUint {
        &self.public_value
    }

    /// Returns the commitment `a = g^r mod p`.
    pub fn commitment(&self) -> &BigUint {
        &self.commitment
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> ProverPhase {
        match self.state {
            State::CommitmentReady { .. } => ProverPhase::CommitmentReady,
            State::ResponseReady { .. } => ProverPhase::ResponseReady,
        }
    }

    /// Builds the bind string from this prover's `g`, `a` and `y`.
    pub fn transcript(&self, identifier: &str, other_info: &[u8]) -> Transcript {
        Transcript::bind(
            self.context.g(),
            &self.commitment,
            &self.public_value,
            identifier,
            other_info,
        )
    }

    /// Derives the challenge from `transcript` and computes `z = (r - x*c) mod q`.
    ///
    /// The challenge is the unreduced transcript hash; the result always
    /// lies in `[0, q - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyResponded`] on a second call.
    pub fn compute_response(&mut self, transcript: &[u8]) -> Result<BigUint> {
        let (challenge, response) = match &self.state {
            State::ResponseReady { .. } => return Err(Error::AlreadyResponded),
            State::CommitmentReady { x, r } => {
                let q = self.context.q();
                let challenge = self.context.challenge_from_transcript(transcript);
                // r - xc is negative whenever xc mod q exceeds r; add q before reducing.
                let xc = (x * &challenge) % q;
                let response = (r + q - xc) % q;
                (challenge, response)
            }
        };

        self.state = State::ResponseReady {
            challenge,
            response: response.clone(),
        };
        Ok(response)
    }

    /// Returns the challenge once the response has been computed.
    pub fn challenge(&self) -> Option<&BigUint> {
        match &self.state {
            State::ResponseReady { challenge, .. } => Some(challenge),
            State::CommitmentReady { .. } => None,
        }
    }

    /// Returns the response `z` once computed.
    pub fn response(&self) -> Option<&BigUint> {
        match &self.state {
            State::ResponseReady { response, .. } => Some(response),
            State::CommitmentReady { .. } => None,
        }
    }

    /// Packages `(y, a, z, identifier)` for transmission.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResponse`] before [`Prover::compute_response`].
    pub fn to_message(&self, identifier: impl Into<String>) -> Result<ProofMessage> {
        let response = self.response().ok_or(Error::MissingResponse)?;
        Ok(ProofMessage::new(
            self.public_value.clone(),
            self.commitment.clone(),
            response.clone(),
            identifier,
        ))
    }
}

impl fmt::Debug for Prover<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prover")
            .field("public_value", &self.public_value)
            .field("commitment", &self.commitment)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

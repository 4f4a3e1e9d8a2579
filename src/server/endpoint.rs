//! Transport-agnostic verification endpoint.
//!
//! Turns an inbound proof message into an explicit outcome. Undecodable input
//! is reported as [`VerificationOutcome::Malformed`], a failed equation as
//! [`VerificationOutcome::Rejected`], and problems on the server side (the
//! other-info could not be fetched) surface as `Err`, never as a rejection.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};

use super::other_info::OtherInfoSource;
use crate::{Error, GroupContext, ProofMessage, Result, Verifier};

/// Maximum accepted identifier length in bytes.
const MAX_IDENTIFIER_LEN: usize = 1024;

/// Result of verifying one proof message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationOutcome {
    /// The proof verified.
    Accepted,
    /// The message was well formed but the proof did not verify.
    Rejected,
    /// The message could not be decoded.
    Malformed(String),
}

impl VerificationOutcome {
    /// Returns true for [`VerificationOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// HTTP-style status for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Accepted => 200,
            Self::Rejected => 401,
            Self::Malformed(_) => 400,
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> String {
        match self {
            Self::Accepted => "Zero knowledge proof successfully verified".to_string(),
            Self::Rejected => "Zero knowledge proof failed".to_string(),
            Self::Malformed(reason) => format!("Malformed proof message: {reason}"),
        }
    }
}

/// HTTP-style status for a boundary error returned by the endpoint.
pub fn error_status_code(error: &Error) -> u16 {
    match error {
        Error::OtherInfoUnavailable(_) | Error::RandomnessUnavailable(_) => 503,
        _ => 500,
    }
}

/// Verifies inbound proofs against this server's other-info.
pub struct VerificationEndpoint<S> {
    context: Arc<GroupContext>,
    other_info: S,
}

impl<S: OtherInfoSource> VerificationEndpoint<S> {
    /// Creates an endpoint over a shared group context.
    pub fn new(context: Arc<GroupContext>, other_info: S) -> Self {
        Self {
            context,
            other_info,
        }
    }

    /// Returns the shared group context.
    pub fn context(&self) -> &GroupContext {
        &self.context
    }

    /// Decodes a JSON proof message and verifies it.
    ///
    /// # Errors
    ///
    /// Only boundary failures are errors; see [`VerificationEndpoint::handle_message`].
    pub fn handle_json(&self, body: &[u8]) -> Result<VerificationOutcome> {
        counter!("nizk.verify.requests").increment(1);

        match ProofMessage::from_json(body) {
            Ok(message) => self.verify(&message),
            Err(e) => Ok(Self::malformed(e)),
        }
    }

    /// Builds a message from decimal-string fields and verifies it.
    pub fn handle_parts(
        &self,
        y: &str,
        a: &str,
        z: &str,
        identifier: &str,
    ) -> Result<VerificationOutcome> {
        counter!("nizk.verify.requests").increment(1);

        match ProofMessage::from_decimal(y, a, z, identifier) {
            Ok(message) => self.verify(&message),
            Err(e) => Ok(Self::malformed(e)),
        }
    }

    /// Verifies an already decoded message.
    ///
    /// A fresh [`Verifier`] is built for every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OtherInfoUnavailable`] if the other-info source fails.
    pub fn handle_message(&self, message: &ProofMessage) -> Result<VerificationOutcome> {
        counter!("nizk.verify.requests").increment(1);
        self.verify(message)
    }

    fn verify(&self, message: &ProofMessage) -> Result<VerificationOutcome> {
        let identifier = message.identifier();
        if identifier.is_empty() {
            return Ok(Self::malformed("identifier cannot be empty"));
        }
        if identifier.len() > MAX_IDENTIFIER_LEN {
            return Ok(Self::malformed("identifier too long"));
        }

        let other_info = self.other_info.fetch()?;
        debug!(identifier, other_info_len = other_info.len(), "verifying proof");

        let accepted = Verifier::new(&self.context).verify_message(message, &other_info)?;
        if accepted {
            counter!("nizk.verify.accepted").increment(1);
            info!(identifier, "proof accepted");
            Ok(VerificationOutcome::Accepted)
        } else {
            counter!("nizk.verify.rejected").increment(1);
            warn!(identifier, "proof rejected");
            Ok(VerificationOutcome::Rejected)
        }
    }

    fn malformed(reason: impl ToString) -> VerificationOutcome {
        let reason = reason.to_string();
        counter!("nizk.verify.malformed").increment(1);
        warn!(%reason, "malformed proof message");
        VerificationOutcome::Malformed(reason)
    }
}

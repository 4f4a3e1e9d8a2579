//! Proof message exchanged between prover and verifier.
//!
//! Big integers are carried as decimal strings so no value ever passes
//! through a fixed-width or floating-point number type.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Upper bound on decimal digits accepted for a single field.
const MAX_DECIMAL_DIGITS: usize = 2048;

/// The `(y, a, z, identifier)` record sent from prover to verifier.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProofMessage {
    #[serde(with = "decimal")]
    y: BigUint,
    #[serde(with = "decimal")]
    a: BigUint,
    #[serde(with = "decimal")]
    z: BigUint,
    #[serde(alias = "user_id")]
    identifier: String,
}

impl ProofMessage {
    /// Creates a message from its parts.
    pub fn new(y: BigUint, a: BigUint, z: BigUint, identifier: impl Into<String>) -> Self {
        Self {
            y,
            a,
            z,
            identifier: identifier.into(),
        }
    }

    /// Builds a message from decimal-string fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedMessage`] if a field is not a decimal integer.
    pub fn from_decimal(y: &str, a: &str, z: &str, identifier: &str) -> Result<Self> {
        Ok(Self {
            y: parse_decimal("y", y)?,
            a: parse_decimal("a", a)?,
            z: parse_decimal("z", z)?,
            identifier: identifier.to_string(),
        })
    }

    /// Decodes a JSON message.
    ///
    /// Missing or non-integer fields yield [`Error::MalformedMessage`]; input
    /// that is not JSON at all yields [`Error::SerializationError`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => Error::MalformedMessage(e.to_string()),
            _ => Error::SerializationError(e.to_string()),
        })
    }

    /// Encodes the message as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::SerializationError(e.to_string()))
    }

    /// Returns the public value `y`.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Returns the commitment `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Returns the response `z`.
    pub fn z(&self) -> &BigUint {
        &self.z
    }

    /// Returns the prover-chosen identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<BigUint> {
    if value.is_empty() {
        return Err(Error::MalformedMessage(format!("Field {field} is empty")));
    }

    if value.len() > MAX_DECIMAL_DIGITS {
        return Err(Error::MalformedMessage(format!("Field {field} is too long")));
    }

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedMessage(format!(
            "Field {field} is not a decimal integer"
        )));
    }

    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        Error::MalformedMessage(format!("Field {field} is not a decimal integer"))
    })
}

mod decimal {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        super::parse_decimal("value", &text).map_err(serde::de::Error::custom)
    }
}

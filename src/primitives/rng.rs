//! Cryptographically secure random number generator.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::{Error, Result};

/// Cryptographically secure random number generator.
///
/// This is a thin wrapper around `OsRng` that provides a consistent interface
/// for cryptographic randomness throughout the library. `OsRng` holds no state,
/// so independent instances may be used from any number of threads.
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }

    /// Creates a generator after confirming the OS source can deliver bytes.
    ///
    /// Binaries call this at startup so a missing entropy source aborts early.
    pub fn checked() -> Result<Self> {
        let mut rng = Self::new();
        let mut probe = [0u8; 16];
        rng.try_fill_bytes(&mut probe)
            .map_err(|e| Error::RandomnessUnavailable(e.to_string()))?;
        Ok(rng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

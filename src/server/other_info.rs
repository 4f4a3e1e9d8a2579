//! Sources of the server-bound "other info" mixed into every transcript.
//!
//! The bytes are opaque to the protocol. Whatever the prover bound must be
//! reproduced exactly on the verifier side, so the usual choice is material
//! both sides can obtain independently, such as the server's TLS certificate.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Error, Result};

/// Supplies the other-info bytes for one verification.
pub trait OtherInfoSource: Send + Sync {
    /// Fetches the current other-info bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OtherInfoUnavailable`] if the material cannot be read.
    fn fetch(&self) -> Result<Vec<u8>>;
}

impl<T: OtherInfoSource + ?Sized> OtherInfoSource for Arc<T> {
    fn fetch(&self) -> Result<Vec<u8>> {
        (**self).fetch()
    }
}

/// Fixed other-info value.
#[derive(Clone, Debug)]
pub struct StaticOtherInfo(Vec<u8>);

impl StaticOtherInfo {
    /// Wraps the given bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
}

impl OtherInfoSource for StaticOtherInfo {
    fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

/// PEM certificate re-read from disk on every fetch, so a rotated
/// certificate takes effect without a restart.
#[derive(Clone, Debug)]
pub struct CertificateFile {
    path: PathBuf,
}

impl CertificateFile {
    /// Creates a source reading the PEM file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the certificate path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OtherInfoSource for CertificateFile {
    fn fetch(&self) -> Result<Vec<u8>> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            Error::OtherInfoUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        if bytes.is_empty() {
            return Err(Error::OtherInfoUnavailable(format!(
                "{}: certificate file is empty",
                self.path.display()
            )));
        }

        Ok(bytes)
    }
}

/// Source selected through configuration.
#[derive(Clone, Debug)]
pub enum ConfiguredOtherInfo {
    /// Fixed value.
    Static(StaticOtherInfo),
    /// Certificate file.
    Certificate(CertificateFile),
}

impl OtherInfoSource for ConfiguredOtherInfo {
    fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            Self::Static(source) => source.fetch(),
            Self::Certificate(source) => source.fetch(),
        }
    }
}

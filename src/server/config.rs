use std::net::SocketAddr;
use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use super::other_info::{CertificateFile, ConfiguredOtherInfo, StaticOtherInfo};
use crate::{Error, GroupContext, GroupParameters, Result, Rfc5114Group};

/// Default location of the TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/nizk.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "NIZK_CONFIG_PATH";

/// Top-level configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NizkConfig {
    /// Group parameter selection.
    pub group: GroupSettings,
    /// Server listening settings.
    pub server: ServerSettings,
    /// Source of the server-bound other-info.
    pub other_info: OtherInfoSettings,
    /// Prometheus exporter settings.
    pub metrics: MetricsSettings,
}

/// Group parameter selection: a named preset, or custom hex `p`, `q`, `g`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    /// Preset name, used when no custom parameters are given.
    pub preset: String,
    /// Custom modulus (hex).
    pub p: Option<String>,
    /// Custom subgroup order (hex).
    pub q: Option<String>,
    /// Custom generator (hex).
    pub g: Option<String>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            preset: Rfc5114Group::Modp1024Sub160.name().to_string(),
            p: None,
            q: None,
            g: None,
        }
    }
}

impl GroupSettings {
    /// Resolves and validates the configured parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupParameters`] for an unknown preset, a
    /// partial set of custom values, or values that fail validation.
    pub fn parameters(&self) -> Result<GroupParameters> {
        match (&self.p, &self.q, &self.g) {
            (Some(p), Some(q), Some(g)) => GroupParameters::from_hex(p, q, g),
            (None, None, None) => Ok(Rfc5114Group::from_name(&self.preset)?.parameters()),
            _ => Err(Error::InvalidGroupParameters(
                "Custom group requires all of p, q and g".to_string(),
            )),
        }
    }
}

/// Server listening settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Hostname or IP address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50051,
        }
    }
}

impl ServerSettings {
    /// Converts host and port into a socket address.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                Error::Config(format!(
                    "Invalid server address {}:{}: {e}",
                    self.host, self.port
                ))
            })
    }
}

/// Prometheus exporter settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Serve `/metrics` when true.
    pub enabled: bool,
    /// Exporter port, bound on the server host.
    pub port: u16,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9090,
        }
    }
}

impl MetricsSettings {
    /// Exporter address on `host`, or `None` when disabled.
    pub fn addr(&self, host: &str) -> Result<Option<SocketAddr>> {
        if !self.enabled {
            return Ok(None);
        }

        let server = ServerSettings {
            host: host.to_string(),
            port: self.port,
        };
        server.addr().map(Some)
    }
}

/// Where the verifier obtains its other-info.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherInfoSettings {
    /// PEM certificate re-read for every verification.
    pub certificate_path: Option<PathBuf>,
    /// Fixed value.
    pub value: Option<String>,
}

impl OtherInfoSettings {
    /// Builds the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] unless exactly one option is set.
    pub fn source(&self) -> Result<ConfiguredOtherInfo> {
        match (&self.certificate_path, &self.value) {
            (Some(path), None) => Ok(ConfiguredOtherInfo::Certificate(CertificateFile::new(
                path.clone(),
            ))),
            (None, Some(value)) => Ok(ConfiguredOtherInfo::Static(StaticOtherInfo::new(
                value.as_bytes(),
            ))),
            (Some(_), Some(_)) => Err(Error::Config(
                "Set only one of other_info.certificate_path and other_info.value".to_string(),
            )),
            (None, None) => Err(Error::Config(
                "One of other_info.certificate_path or other_info.value is required".to_string(),
            )),
        }
    }
}

impl NizkConfig {
    /// Loads configuration from `.env`, a TOML file and environment variables.
    ///
    /// Priority (highest first): `NIZK_`-prefixed environment variables,
    /// the TOML file, built-in defaults. Nested keys are separated by a double
    /// underscore, e.g. `NIZK_OTHER_INFO__CERTIFICATE_PATH` or
    /// `NIZK_SERVER__PORT`. The file path comes from `NIZK_CONFIG_PATH` and
    /// defaults to `config/nizk.toml`; a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a source is malformed.
    pub fn from_env() -> Result<Self> {
        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::figment(&path)
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Layered configuration sources for the given TOML path.
    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(NizkConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("NIZK_").ignore(&["CONFIG_PATH"]).split("__"))
    }

    /// Validates the configuration for serving.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        self.group.parameters()?;
        let addr = self.server.addr()?;
        if let Some(metrics_addr) = self.metrics.addr(&self.server.host)? {
            if metrics_addr.port() == addr.port() {
                return Err(Error::Config(
                    "metrics.port must differ from server.port".to_string(),
                ));
            }
        }
        self.other_info.source()?;
        Ok(())
    }

    /// Builds the shared group context.
    pub fn group_context(&self) -> Result<GroupContext> {
        Ok(GroupContext::new(self.group.parameters()?))
    }
}

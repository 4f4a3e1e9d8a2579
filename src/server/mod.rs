/// Layered configuration.
pub mod config;

/// Transport-agnostic verification endpoint.
pub mod endpoint;

/// Other-info sources bound into every transcript.
pub mod other_info;

/// gRPC service implementation.
#[cfg(feature = "grpc")]
pub mod service;

pub use config::{GroupSettings, MetricsSettings, NizkConfig, OtherInfoSettings, ServerSettings};
pub use endpoint::{error_status_code, VerificationEndpoint, VerificationOutcome};
pub use other_info::{CertificateFile, ConfiguredOtherInfo, OtherInfoSource, StaticOtherInfo};
#[cfg(feature = "grpc")]
pub use service::NizkVerifierService;

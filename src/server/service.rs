use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::error;

use super::endpoint::{VerificationEndpoint, VerificationOutcome};
use super::other_info::OtherInfoSource;
use crate::proto::nizk_verifier_server::NizkVerifier;
use crate::proto::{GroupInfoRequest, GroupInfoResponse, VerifyRequest, VerifyResponse};
use crate::Error;

/// gRPC front end for a [`VerificationEndpoint`].
pub struct NizkVerifierService<S> {
    endpoint: Arc<VerificationEndpoint<S>>,
}

impl<S> NizkVerifierService<S> {
    /// Wraps a shared endpoint.
    pub fn new(endpoint: Arc<VerificationEndpoint<S>>) -> Self {
        Self { endpoint }
    }
}

fn status_for_error(error: &Error) -> Status {
    match error {
        Error::OtherInfoUnavailable(_) | Error::RandomnessUnavailable(_) => {
            Status::unavailable(error.to_string())
        }
        _ => Status::internal(error.to_string()),
    }
}

#[tonic::async_trait]
impl<S: OtherInfoSource + 'static> NizkVerifier for NizkVerifierService<S> {
    async fn verify(
        &self,
        request: Request<VerifyRequest>,
    ) -> Result<Response<VerifyResponse>, Status> {
        let req = request.into_inner();
        let endpoint = Arc::clone(&self.endpoint);

        // Modular exponentiation and the certificate read both block.
        let outcome = tokio::task::spawn_blocking(move || {
            endpoint.handle_parts(&req.y, &req.a, &req.z, &req.identifier)
        })
        .await
        .map_err(|e| {
            error!("Verification task failed: {e}");
            Status::internal("Verification task failed")
        })?
        .map_err(|e| {
            error!("Verification could not complete: {e}");
            status_for_error(&e)
        })?;

        match outcome {
            VerificationOutcome::Accepted => Ok(Response::new(VerifyResponse {
                accepted: true,
                message: outcome.message(),
            })),
            VerificationOutcome::Rejected => Err(Status::permission_denied(outcome.message())),
            VerificationOutcome::Malformed(_) => Err(Status::invalid_argument(outcome.message())),
        }
    }

    async fn group_info(
        &self,
        _request: Request<GroupInfoRequest>,
    ) -> Result<Response<GroupInfoResponse>, Status> {
        let ctx = self.endpoint.context();

        Ok(Response::new(GroupInfoResponse {
            p: ctx.p().to_string(),
            q: ctx.q().to_string(),
            g: ctx.g().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::other_info::{CertificateFile, StaticOtherInfo};
    use crate::{GroupContext, Prover, SecureRng, Witness};

    fn request(ctx: &GroupContext, identifier: &str, other_info: &[u8]) -> VerifyRequest {
        let mut rng = SecureRng::new();
        let mut prover = Prover::new(ctx, Witness::Fresh, &mut rng).unwrap();
        let transcript = prover.transcript(identifier, other_info);
        let z = prover.compute_response(transcript.as_bytes()).unwrap();

        VerifyRequest {
            y: prover.public_value().to_string(),
            a: prover.commitment().to_string(),
            z: z.to_string(),
            identifier: identifier.to_string(),
        }
    }

    fn service<S: OtherInfoSource>(ctx: &Arc<GroupContext>, source: S) -> NizkVerifierService<S> {
        NizkVerifierService::new(Arc::new(VerificationEndpoint::new(ctx.clone(), source)))
    }

    #[tokio::test]
    async fn verify_maps_outcomes_to_status() {
        let ctx = Arc::new(GroupContext::rfc5114_1024_160());
        let svc = service(&ctx, StaticOtherInfo::new("cert"));

        let ok = svc
            .verify(Request::new(request(&ctx, "node-1", b"cert")))
            .await
            .unwrap()
            .into_inner();
        assert!(ok.accepted);

        let denied = svc
            .verify(Request::new(request(&ctx, "node-1", b"other-cert")))
            .await
            .unwrap_err();
        assert_eq!(denied.code(), tonic::Code::PermissionDenied);

        let mut bad = request(&ctx, "node-1", b"cert");
        bad.z = "not-a-number".to_string();
        let invalid = svc.verify(Request::new(bad)).await.unwrap_err();
        assert_eq!(invalid.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn missing_certificate_is_unavailable() {
        let ctx = Arc::new(GroupContext::rfc5114_1024_160());
        let svc = service(&ctx, CertificateFile::new("/nonexistent/schnorr-nizk/cert.pem"));

        let status = svc
            .verify(Request::new(request(&ctx, "node-1", b"cert")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unavailable);
    }

    #[tokio::test]
    async fn group_info_reports_decimal_parameters() {
        let ctx = Arc::new(GroupContext::rfc5114_1024_160());
        let svc = service(&ctx, StaticOtherInfo::new("cert"));

        let info = svc
            .group_info(Request::new(GroupInfoRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(info.p, ctx.p().to_string());
        assert_eq!(info.q, ctx.q().to_string());
        assert_eq!(info.g, ctx.g().to_string());
    }
}

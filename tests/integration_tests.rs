mod common;

use std::path::PathBuf;
use std::sync::Arc;

use schnorr_nizk::server::{
    error_status_code, CertificateFile, OtherInfoSource, VerificationEndpoint, VerificationOutcome,
};
use schnorr_nizk::{Error, GroupContext, Witness};

struct TempCert(PathBuf);

impl TempCert {
    fn new(name: &str, contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "schnorr-nizk-{name}-{}.pem",
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("Failed to write certificate");
        Self(path)
    }
}

impl Drop for TempCert {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn json_flow_against_certificate_file() {
    common::init_tracing();

    let cert = TempCert::new(
        "flow",
        "-----BEGIN CERTIFICATE-----\nflow\n-----END CERTIFICATE-----\n",
    );
    let source = CertificateFile::new(&cert.0);
    let other_info = source.fetch().unwrap();

    let ctx = Arc::new(GroupContext::rfc5114_1024_160());
    let endpoint = VerificationEndpoint::new(ctx.clone(), source);

    let message = common::prove(&ctx, Witness::Fresh, "node-7", &other_info);
    let body = message.to_json().unwrap();

    let outcome = endpoint.handle_json(body.as_bytes()).unwrap();
    assert!(outcome.is_accepted());
    assert_eq!(outcome.status_code(), 200);
}

#[test]
fn rotated_certificate_invalidates_old_proofs() {
    let cert = TempCert::new("rotate", "-----BEGIN CERTIFICATE-----\nold\n");
    let ctx = Arc::new(GroupContext::rfc5114_1024_160());
    let endpoint = VerificationEndpoint::new(ctx.clone(), CertificateFile::new(&cert.0));

    let old_cert = b"-----BEGIN CERTIFICATE-----\nold\n";
    let message = common::prove(&ctx, Witness::Fresh, "node-7", old_cert);
    assert_eq!(
        endpoint.handle_message(&message).unwrap(),
        VerificationOutcome::Accepted
    );

    std::fs::write(&cert.0, "-----BEGIN CERTIFICATE-----\nnew\n").unwrap();
    assert_eq!(
        endpoint.handle_message(&message).unwrap(),
        VerificationOutcome::Rejected
    );
}

#[test]
fn legacy_user_id_body_is_accepted() {
    let ctx = Arc::new(GroupContext::rfc5114_1024_160());
    let endpoint = VerificationEndpoint::new(
        ctx.clone(),
        schnorr_nizk::server::StaticOtherInfo::new("cert"),
    );

    let message = common::prove(&ctx, Witness::Fresh, "abc123", b"cert");
    let body = format!(
        r#"{{"y":"{}","a":"{}","z":"{}","user_id":"abc123"}}"#,
        message.y(),
        message.a(),
        message.z()
    );

    let outcome = endpoint.handle_json(body.as_bytes()).unwrap();
    assert_eq!(outcome, VerificationOutcome::Accepted);
}

#[test]
fn oversized_identifier_is_malformed() {
    let ctx = Arc::new(GroupContext::rfc5114_1024_160());
    let endpoint = VerificationEndpoint::new(
        ctx.clone(),
        schnorr_nizk::server::StaticOtherInfo::new("cert"),
    );

    let identifier = "n".repeat(2000);
    let message = common::prove(&ctx, Witness::Fresh, &identifier, b"cert");

    let outcome = endpoint.handle_message(&message).unwrap();
    assert!(matches!(outcome, VerificationOutcome::Malformed(_)));
    assert_eq!(outcome.status_code(), 400);
}

#[test]
fn missing_certificate_maps_to_service_unavailable() {
    let ctx = Arc::new(GroupContext::rfc5114_1024_160());
    let endpoint = VerificationEndpoint::new(
        ctx.clone(),
        CertificateFile::new("/nonexistent/schnorr-nizk/server.pem"),
    );

    let message = common::prove(&ctx, Witness::Fresh, "node-7", b"cert");
    let body = message.to_json().unwrap();

    let err = endpoint.handle_json(body.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::OtherInfoUnavailable(_)));
    assert_eq!(error_status_code(&err), 503);
}

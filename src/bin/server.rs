use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use schnorr_nizk::proto::nizk_verifier_server::NizkVerifierServer;
use schnorr_nizk::server::{NizkConfig, NizkVerifierService, VerificationEndpoint};
use schnorr_nizk::SecureRng;
use tokio::signal;
use tonic::transport::Server;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Refuse to start without working OS randomness.
    SecureRng::checked()?;

    let config = NizkConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {e}");
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {e}");
        return Err(format!("Invalid configuration: {e}").into());
    }

    let ctx = Arc::new(config.group_context()?);
    let other_info = config.other_info.source()?;
    let addr = config.server.addr()?;

    if let Some(metrics_addr) = config.metrics.addr(&config.server.host)? {
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
            .map_err(|e| {
                error!("Failed to start metrics server: {e}");
                e
            })?;
        info!("Metrics server started on {metrics_addr}");
    }

    info!(
        group = %config.group.preset,
        p_bits = ctx.p().bits(),
        q_bits = ctx.q().bits(),
        "Group context ready"
    );
    info!(?other_info, "Other info source configured");

    let endpoint = Arc::new(VerificationEndpoint::new(ctx, other_info));
    let service = NizkVerifierService::new(endpoint);

    info!("Server starting on {addr}");

    Server::builder()
        .add_service(NizkVerifierServer::new(service))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Initiating graceful shutdown (allowing in-flight requests to complete)");
}

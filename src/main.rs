//! clinsight server binary.
//!
//! Builds the completion clients once at startup and hands them to the two
//! pipelines; a missing credential fails fast instead of surfacing later as
//! a per-request error. The runtime is built explicitly because the
//! blocking HTTP clients must be constructed outside an async context.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use clinsight::api::{api_router, ApiContext};
use clinsight::config::AppConfig;
use clinsight::pipeline::analyzer::ConversationAnalyzer;
use clinsight::pipeline::client::GeminiClient;
use clinsight::pipeline::verifier::PrescriptionVerifier;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clinsight=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();

    let ctx = ApiContext {
        analyzer: Arc::new(
            ConversationAnalyzer::new(Box::new(must_init_client(&config)))
                .with_snippet_limit(config.raw_snippet_limit),
        ),
        verifier: Arc::new(
            PrescriptionVerifier::new(Box::new(must_init_client(&config)))
                .with_snippet_limit(config.raw_snippet_limit),
        ),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let router = api_router(ctx);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "cannot build async runtime");
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!(error = %e, %addr, "cannot bind listener");
                std::process::exit(1);
            }
        };

        tracing::info!(%addr, model = %config.model, "clinsight API listening");

        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "server error");
        }
    });
}

/// One completion client per pipeline; exit when the credential is absent.
fn must_init_client(config: &AppConfig) -> GeminiClient {
    match GeminiClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "cannot initialize completion client");
            std::process::exit(1);
        }
    }
}

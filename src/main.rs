// [library] Error handling crate - startup failures bubble out of main as anyhow::Error
use anyhow::Result;
use std::sync::Arc;

// [business] Library modules - configuration, database, and HTTP layers
use ghg_records::{
    config::Config,
    db,
    generator::RandomRecordGenerator,
    instance::InstanceId,
    web::{self, AppState},
};

// [library] Tower HTTP middleware - request/response tracing
use tower_http::trace::TraceLayer;

// [library] Structured logging framework
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // [library] Log filter comes from RUST_LOG, with a sensible default for this service
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ghg_records=info,tower_http=debug")),
        )
        .finish();

    // [library] Without a subscriber nothing is observable, so failing here is fatal
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Starting ghg-records API");

    // [business] Fail fast on missing credentials
    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // [business] One driver for the whole process, shared by every request
    info!("Creating Neo4j driver...");
    let database = db::connect(&config).await?;

    let instance = InstanceId::from_host();
    info!("Serving as instance {}", instance);

    let state = AppState::new(database, Arc::new(RandomRecordGenerator::new()), instance);

    let app = web::create_app_router(state).layer(
        // [library] HTTP request/response logging
        TraceLayer::new_for_http(),
    );

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server running at http://localhost:{}", config.app_port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

// [business] Resolve on Ctrl+C or SIGTERM so in-flight requests can finish
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

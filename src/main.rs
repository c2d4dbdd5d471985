use appdeck::logging::init_tracing;
use appdeck::router::init_router;
use appdeck::state::init_app_state;
use appdeck_config::ServerConfig;
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    if let Err(e) = init_tracing(&server_config.log_dir) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(server_config).await {
        error!(error = %format!("{:#}", e), "Server failed to start");
        std::process::exit(1);
    }
}

async fn run(server_config: ServerConfig) -> anyhow::Result<()> {
    let state = init_app_state().await?;
    info!(
        mode = %state.authenticator.mode(),
        admins = state.authenticator.resolver().allowlist().len(),
        apps_file = %state.app_store.path().display(),
        "Application state initialized"
    );

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.addr).await?;
    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

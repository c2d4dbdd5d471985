use std::path::Path;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs every request with a generated request id, its status and latency.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("request", request_id = %request_id);

    async move {
        info!(method = %method, path = %matched_path, "Incoming request");

        let response = next.run(req).await;
        let latency_ms = start.elapsed().as_millis();
        let status = response.status().as_u16();

        match status {
            400..=499 => warn!(
                method = %method,
                path = %matched_path,
                status,
                latency_ms = %latency_ms,
                "Client error"
            ),
            500..=599 => error!(
                method = %method,
                path = %matched_path,
                status,
                latency_ms = %latency_ms,
                "Server error"
            ),
            _ => info!(
                method = %method,
                path = %matched_path,
                status,
                latency_ms = %latency_ms,
                "Request completed"
            ),
        }

        response
    }
    .instrument(span)
    .await
}

fn default_filter() -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    match std::env::var("LOG_LEVEL") {
        Ok(level) if !level.trim().is_empty() => EnvFilter::new(level),
        _ => EnvFilter::new(format!(
            "{}=info,appdeck_auth=info,tower_http=warn",
            env!("CARGO_CRATE_NAME")
        )),
    }
}

/// Console output plus daily rolling files under `log_dir`: a plain file
/// for errors and a JSON file for structured ingestion.
pub fn init_tracing(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(default_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "appdeck.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "appdeck.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()?;

    info!(log_dir = %log_dir.display(), "Tracing initialized");
    Ok(())
}

/// Console-only logging for short-lived commands.
pub fn init_cli_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact()
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                ),
        )
        .try_init();
}

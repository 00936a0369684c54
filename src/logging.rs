use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::path::Path;
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);

    let response = next.run(req).instrument(span.clone()).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    let _entered = span.enter();
    match status {
        400..=499 => warn!(status, latency_ms = %latency_ms, "Client error"),
        500..=599 => error!(status, latency_ms = %latency_ms, "Server error"),
        _ => info!(status, latency_ms = %latency_ms, "Request completed"),
    }

    response
}

fn init_tracer(endpoint: String) -> Result<Tracer, TraceError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
        KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        KeyValue::new(
            "environment",
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        ),
    ]);

    let otlp_exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint);

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(otlp_exporter)
        .with_trace_config(
            opentelemetry_sdk::trace::Config::default()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)
}

/// Installs the global subscriber.
///
/// Console output follows `RUST_LOG`. Errors go to a daily plain-text log and
/// everything at info and above to a daily JSON log, both under `log_dir`.
/// Spans are exported over OTLP only when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
pub fn init_tracing(log_dir: &Path) -> std::io::Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    std::fs::create_dir_all(log_dir)?;

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,trilium_blog_cache=info,tower_http=warn",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let error_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "trilium-blog.log");
    let file_layer = fmt::layer()
        .with_writer(error_appender)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "trilium-blog.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer);

    let Ok(endpoint) = std::env::var(OTLP_ENDPOINT_VAR) else {
        registry.init();
        info!("Tracing initialized (console and file logging)");
        return Ok(());
    };

    match init_tracer(endpoint.clone()) {
        Ok(tracer) => {
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();
            info!(otlp.endpoint = %endpoint, "Tracing initialized with OpenTelemetry export");
        }
        Err(e) => {
            registry.init();
            warn!(error = %e, "Failed to initialize OpenTelemetry, continuing with file logging only");
        }
    }

    Ok(())
}

pub fn shutdown_tracer() {
    global::shutdown_tracer_provider();
}

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;

use trilium_blog::logging::{init_tracing, shutdown_tracer};
use trilium_blog::metrics::init_metrics;
use trilium_blog::router::init_router;
use trilium_blog::state::init_app_state;
use trilium_blog_config::ServerConfig;

const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug)]
#[command(name = "trilium-blog", version, about = "Publishes Trilium notes as a blog")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Port as a bare argument, e.g. `trilium-blog 9000`
    #[arg(value_name = "PORT", conflicts_with = "port")]
    port_arg: Option<u16>,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
}

impl Args {
    fn port(&self) -> u16 {
        self.port.or(self.port_arg).unwrap_or(DEFAULT_PORT)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir).context("Failed to create log directory")?;

    let metrics = init_metrics();
    let state = init_app_state()
        .await
        .context("Failed to initialize application state")?
        .with_metrics(metrics);
    let app = init_router(state);

    let addr = format!("{}:{}", args.host, args.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    shutdown_tracer();
    Ok(())
}

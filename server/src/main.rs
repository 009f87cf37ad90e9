use anyhow::Result;
use articles_core::ArticleStore;
use articles_server::build_app;
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "articles-server", about = "In-memory article repository with keyword and tag search")]
struct Args {
    /// JSON file the collection is loaded from at startup and flushed to on shutdown
    #[arg(long, default_value = "articles.json")]
    data: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let store = Arc::new(ArticleStore::load_or_empty(&args.data));
    let app = build_app(Arc::clone(&store));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, articles = store.len(), "server listening");
    let served = axum::serve(listener, app).with_graceful_shutdown(wait_for_signal()).await;

    flush_on_shutdown(&store, &args.data);
    served?;
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

fn flush_on_shutdown(store: &ArticleStore, path: &Path) {
    if let Err(e) = store.flush(path) {
        tracing::error!(path = %path.display(), "failed to flush articles on shutdown: {:#}", e);
    }
}

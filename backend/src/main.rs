use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};
use tracker_backend::{config::Config, start_server};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = start_server(Config::load()).await {
        error!("Server failed: {e}");
        std::process::exit(1);
    }
}

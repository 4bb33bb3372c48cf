use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Ratings dataset: a JSON file path or an http(s) URL
    #[arg(long, default_value = "data/professor_details.json")]
    data: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Timeout in seconds when fetching the dataset over http
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let app: Router = build_app(&args.data, Duration::from_secs(args.timeout_secs))?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, data = %args.data, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

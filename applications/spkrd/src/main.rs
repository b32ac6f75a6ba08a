/// spkrd - FreeBSD speaker device network server
use clap::Parser;
use spkrd::{server, AppState, Speaker, SpkrdConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spkrd")]
#[command(author, version, about = "FreeBSD speaker device network server", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Retry timeout in seconds
    #[arg(short, long)]
    retry_timeout: Option<u64>,

    /// Path to speaker device
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spkrd=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Command-line flags win over file and environment
    let mut config = SpkrdConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(retry_timeout) = cli.retry_timeout {
        config.retry_timeout = retry_timeout;
    }
    if let Some(device) = cli.device {
        config.device = device;
    }
    config.validate()?;

    let speaker = Speaker::new(config.device.clone(), config.retry_timeout());
    tracing::info!(
        "Starting spkrd on port {} with {}s retry timeout using device {}",
        config.port,
        config.retry_timeout,
        speaker.device().display()
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    server::serve(listener, AppState::new(speaker)).await?;

    Ok(())
}

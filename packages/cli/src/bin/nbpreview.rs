use clap::Parser;
use std::net::IpAddr;
use std::process;
use tracing::error;

use nbpreview_cli::config::Config;

#[derive(Parser)]
#[command(name = "nbpreview")]
#[command(about = "Serve GitHub-hosted Jupyter notebooks to the preview viewer via the gh CLI")]
#[command(version)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        if port == 0 {
            anyhow::bail!("Port 0 is out of valid range (1-65535)");
        }
        config.port = port;
    }

    nbpreview_cli::run_server(config).await
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

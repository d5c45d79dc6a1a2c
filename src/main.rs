use clap::Parser;
use knapcqm::{start_server, SamplerBackend, ServerConfig};
use log::LevelFilter;
use std::net::SocketAddr;

/// Hybrid CQM sampler service
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, default_value = "0.0.0.0:50051")]
    address: SocketAddr,
    /// Sampler used when a request asks for `auto`: auto, exact or milp
    #[arg(short, long, default_value = "auto")]
    backend: SamplerBackend,
    /// Sampler runs executed at once; timed-out runs hold their slot until they finish
    #[arg(short, long, default_value_t = 4)]
    max_concurrent_runs: usize,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level)
        .init();

    let config = ServerConfig::new(cli.address, cli.backend)
        .with_max_concurrent_runs(cli.max_concurrent_runs);
    start_server(config).await?;

    Ok(())
}

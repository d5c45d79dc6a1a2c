// Infrastructure: Server setup and configuration

use std::net::SocketAddr;

use log::info;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::application::proto::hybrid_sampler_server::HybridSamplerServer;
use crate::application::grpc_service::DEFAULT_MAX_CONCURRENT_RUNS;
use crate::application::GrpcHybridSamplerService;
use crate::domain::SamplerBackend;

pub struct ServerConfig {
    pub address: SocketAddr,
    /// Backend used for requests that ask for `Auto`
    pub backend: SamplerBackend,
    /// Sampler runs executed at once; further requests wait for a slot
    pub max_concurrent_runs: usize,
}

impl ServerConfig {
    pub fn new(address: SocketAddr, backend: SamplerBackend) -> Self {
        Self {
            address,
            backend,
            max_concurrent_runs: DEFAULT_MAX_CONCURRENT_RUNS,
        }
    }

    pub fn with_max_concurrent_runs(mut self, max_runs: usize) -> Self {
        self.max_concurrent_runs = max_runs;
        self
    }
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = GrpcHybridSamplerService::new(config.backend)
        .with_max_concurrent_runs(config.max_concurrent_runs);

    info!(
        "Hybrid CQM sampler listening on {} (default backend: {}, {} concurrent runs)",
        config.address, config.backend, config.max_concurrent_runs
    );

    Server::builder()
        .add_service(HybridSamplerServer::new(service))
        .serve(config.address)
        .await?;

    Ok(())
}

/// Serve on an already bound listener, e.g. an ephemeral port in tests.
pub async fn serve_listener(
    listener: TcpListener,
    backend: SamplerBackend,
) -> Result<(), tonic::transport::Error> {
    let service = GrpcHybridSamplerService::new(backend);
    if let Ok(address) = listener.local_addr() {
        info!("Hybrid CQM sampler listening on {}", address);
    }

    Server::builder()
        .add_service(HybridSamplerServer::new(service))
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
}

// Infrastructure layer: gRPC transport for the hybrid sampler

pub mod client;
pub mod server;

pub use client::HybridSamplerClient;
pub use server::{serve_listener, start_server, ServerConfig};

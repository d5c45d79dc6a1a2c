// Application layer: wire messages, mappers and the gRPC service

pub mod grpc_service;
pub mod mappers;
pub mod proto;

pub use grpc_service::GrpcHybridSamplerService;

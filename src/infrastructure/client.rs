// Infrastructure: client side of the hybrid sampler service

use futures::stream;
use log::{debug, info};
use tonic::transport::Channel;
use tonic::Request;

use crate::application::mappers;
use crate::application::proto::{self, hybrid_sampler_client::HybridSamplerClient as GrpcClient};
use crate::domain::{ConstrainedQuadraticModel, Result, SampleSet, SamplerConfig, SamplerError};

/// Submits models to a remote hybrid sampler
#[derive(Clone)]
pub struct HybridSamplerClient {
    inner: GrpcClient<Channel>,
}

impl HybridSamplerClient {
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        debug!("Connecting to hybrid sampler at {}", endpoint);
        let inner = GrpcClient::connect(endpoint.clone())
            .await
            .map_err(|e| SamplerError::Transport(format!("{}: {}", endpoint, e)))?;
        Ok(Self { inner })
    }

    /// Sample a model in a single request
    pub async fn sample_cqm(
        &mut self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<SampleSet> {
        config.validate()?;
        info!(
            "Submitting '{}' ({} variables) to hybrid sampler",
            config.label,
            model.num_variables()
        );
        let request = mappers::domain_to_proto_request(model, config);
        let response = self
            .inner
            .sample_cqm(Request::new(request))
            .await
            .map_err(mappers::status_to_error)?;
        mappers::proto_to_domain_sampleset(response.into_inner())
    }

    /// Sample a model uploaded as a stream of chunks
    pub async fn sample_cqm_streamed(
        &mut self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<SampleSet> {
        config.validate()?;
        let chunks = mappers::domain_to_proto_chunks(model, config);
        info!(
            "Streaming '{}' to hybrid sampler in {} chunks",
            config.label,
            chunks.len()
        );
        let response = self
            .inner
            .sample_cqm_stream(Request::new(stream::iter(chunks)))
            .await
            .map_err(mappers::status_to_error)?;
        mappers::proto_to_domain_sampleset(response.into_inner())
    }

    pub async fn list_samplers(&mut self) -> Result<Vec<proto::SamplerInfo>> {
        let response = self
            .inner
            .list_samplers(Request::new(proto::Empty {}))
            .await
            .map_err(mappers::status_to_error)?;
        Ok(response.into_inner().samplers)
    }

    pub async fn validate_model(
        &mut self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<proto::ValidationResult> {
        let request = mappers::domain_to_proto_request(model, config);
        let response = self
            .inner
            .validate_model(Request::new(request))
            .await
            .map_err(mappers::status_to_error)?;
        Ok(response.into_inner())
    }
}

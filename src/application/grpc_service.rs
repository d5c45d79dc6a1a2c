use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tonic::{Request, Response, Status};

use super::mappers;
use super::proto;
use crate::domain::{
    ConstrainedQuadraticModel, SampleSet, Sampler, SamplerBackend, SamplerConfig, SamplerError,
};
use crate::sampler::SamplerFactory;

/// Sampler runs the service executes at once unless configured otherwise
pub const DEFAULT_MAX_CONCURRENT_RUNS: usize = 4;

/// gRPC service implementation
pub struct GrpcHybridSamplerService {
    default_backend: SamplerBackend,
    // A permit lives as long as the blocking sampler thread, including runs
    // whose caller already got `deadline_exceeded`.
    runs: Arc<Semaphore>,
}

impl GrpcHybridSamplerService {
    pub fn new(default_backend: SamplerBackend) -> Self {
        Self {
            default_backend,
            runs: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT_RUNS)),
        }
    }

    pub fn with_max_concurrent_runs(mut self, max_runs: usize) -> Self {
        self.runs = Arc::new(Semaphore::new(max_runs.max(1)));
        self
    }

    fn resolve(&self, mut config: SamplerConfig) -> SamplerConfig {
        if config.backend == SamplerBackend::Auto {
            config.backend = self.default_backend;
        }
        config
    }

    async fn sample(
        &self,
        model: ConstrainedQuadraticModel,
        config: SamplerConfig,
    ) -> Result<Response<proto::SampleResponse>, Status> {
        let config = self.resolve(config);
        config.validate().map_err(mappers::error_to_status)?;

        info!(
            "Sampling '{}': {} variables, {} constraints",
            config.label,
            model.num_variables(),
            model.num_constraints()
        );

        let sampler = SamplerFactory::create_sampler(&config).map_err(mappers::error_to_status)?;
        info!("Using sampler: {}", sampler.name());

        if self.runs.available_permits() == 0 {
            debug!("All sampler slots busy, '{}' waits for one", config.label);
        }
        let permit = self
            .runs
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| Status::unavailable("sampler pool is closed"))?;

        let sampleset = run_blocking(sampler, model, config, Some(permit))
            .await
            .map_err(|e| {
                warn!("Sampling failed: {}", e);
                mappers::error_to_status(e)
            })?;

        info!(
            "Returned {} samples ({} feasible) in {:.2} ms",
            sampleset.len(),
            sampleset.feasible().len(),
            sampleset.info.run_time_ms
        );

        Ok(Response::new(mappers::domain_to_proto_sampleset(&sampleset)))
    }
}

impl Default for GrpcHybridSamplerService {
    fn default() -> Self {
        Self::new(SamplerBackend::Auto)
    }
}

/// Run a blocking sampler off the async runtime, bounded by the configured time limit.
pub async fn run_with_time_limit(
    sampler: Arc<dyn Sampler>,
    model: ConstrainedQuadraticModel,
    config: SamplerConfig,
) -> Result<SampleSet, SamplerError> {
    run_blocking(sampler, model, config, None).await
}

/// Like `run_with_time_limit`, holding `permit` until the sampler thread returns.
async fn run_blocking(
    sampler: Arc<dyn Sampler>,
    model: ConstrainedQuadraticModel,
    config: SamplerConfig,
    permit: Option<OwnedSemaphorePermit>,
) -> Result<SampleSet, SamplerError> {
    let time_limit = config.time_limit;
    let label = config.label.clone();
    let name = sampler.name().to_string();
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        sampler.sample_cqm(&model, &config)
    });

    let joined = match time_limit {
        Some(limit) => tokio::time::timeout(Duration::from_secs_f64(limit), task)
            .await
            .map_err(|_| {
                // The blocking thread cannot be cancelled and runs to completion.
                warn!(
                    "'{}' exceeded its {}s budget; {} sampler keeps running in the background",
                    label, limit, name
                );
                SamplerError::TimeLimit(limit)
            })?,
        None => task.await,
    };

    joined.map_err(|e| SamplerError::ExecutionFailed(e.to_string()))?
}

#[tonic::async_trait]
impl proto::hybrid_sampler_server::HybridSampler for GrpcHybridSamplerService {
    async fn sample_cqm(
        &self,
        request: Request<proto::SampleRequest>,
    ) -> Result<Response<proto::SampleResponse>, Status> {
        let (model, config) = mappers::proto_to_domain_request(&request.into_inner())
            .map_err(mappers::error_to_status)?;
        self.sample(model, config).await
    }

    async fn sample_cqm_stream(
        &self,
        request: Request<tonic::Streaming<proto::ModelChunk>>,
    ) -> Result<Response<proto::SampleResponse>, Status> {
        let mut stream = request.into_inner();

        let mut parameters: Option<proto::SamplerParameters> = None;
        let mut variables = Vec::new();
        let mut objective: Option<proto::LinearExpression> = None;
        let mut constraints = Vec::new();

        // Collect all chunks
        while let Some(chunk) = stream.message().await? {
            match chunk.chunk {
                Some(proto::model_chunk::Chunk::Parameters(p)) => parameters = Some(p),
                Some(proto::model_chunk::Chunk::Variable(v)) => variables.push(v),
                Some(proto::model_chunk::Chunk::Objective(o)) => objective = Some(o),
                Some(proto::model_chunk::Chunk::Constraint(c)) => constraints.push(c),
                None => {}
            }
        }

        let model = mappers::assemble_model(&variables, objective.as_ref(), &constraints)
            .map_err(mappers::error_to_status)?;
        let config = mappers::proto_to_domain_config(parameters.as_ref())
            .map_err(mappers::error_to_status)?;
        self.sample(model, config).await
    }

    async fn list_samplers(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::AvailableSamplers>, Status> {
        let samplers = SamplerFactory::available_backends()
            .into_iter()
            .filter_map(|backend| {
                SamplerFactory::create_from_backend(backend)
                    .ok()
                    .map(|sampler| (backend, sampler))
            })
            .map(|(backend, sampler)| {
                let mut capabilities = vec!["Binary Variables".to_string()];
                if sampler.supports_integer() {
                    capabilities.push("Integer Variables".to_string());
                }
                if let Some(max) = sampler.max_variables() {
                    capabilities.push(format!("Up to {} variables", max));
                }
                proto::SamplerInfo {
                    name: sampler.name().to_string(),
                    backend: mappers::domain_to_proto_backend(backend) as i32,
                    supports_integer: sampler.supports_integer(),
                    capabilities,
                }
            })
            .collect();

        Ok(Response::new(proto::AvailableSamplers { samplers }))
    }

    async fn validate_model(
        &self,
        request: Request<proto::SampleRequest>,
    ) -> Result<Response<proto::ValidationResult>, Status> {
        let request = request.into_inner();

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut num_variables = 0;
        let mut num_constraints = 0;

        match mappers::proto_to_domain_request(&request) {
            Ok((model, config)) => {
                num_variables = model.num_variables() as u32;
                num_constraints = model.num_constraints() as u32;

                let config = self.resolve(config);
                if let Err(e) = config.validate() {
                    errors.push(e.to_string());
                }
                match SamplerFactory::create_sampler(&config) {
                    Ok(sampler) => {
                        if let Err(e) = sampler.validate(&model) {
                            errors.push(e.to_string());
                        }
                    }
                    Err(e) => errors.push(e.to_string()),
                }

                if model.constraints.is_empty() {
                    warnings.push("Model has no constraints".to_string());
                }
                if config.time_limit.is_none() {
                    warnings.push("No time limit set".to_string());
                }
            }
            Err(e) => errors.push(e.to_string()),
        }

        Ok(Response::new(proto::ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            num_variables,
            num_constraints,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SampleSetInfo, VarId, Variable};
    use std::time::Instant;

    /// Ignores its time limit and sleeps before answering
    struct SlowSampler(Duration);

    impl Sampler for SlowSampler {
        fn sample_cqm(
            &self,
            _model: &ConstrainedQuadraticModel,
            config: &SamplerConfig,
        ) -> crate::domain::Result<SampleSet> {
            std::thread::sleep(self.0);
            Ok(SampleSet::empty(
                Vec::new(),
                SampleSetInfo {
                    sampler: "Slow".to_string(),
                    problem_label: config.label.clone(),
                    run_time_ms: 0.0,
                },
            ))
        }

        fn name(&self) -> &str {
            "Slow"
        }

        fn supports_integer(&self) -> bool {
            true
        }
    }

    fn one_variable_model() -> ConstrainedQuadraticModel {
        let mut cqm = ConstrainedQuadraticModel::new();
        cqm.add_variable(Variable::binary(VarId(0))).unwrap();
        cqm
    }

    #[tokio::test]
    async fn time_limit_interrupts_waiting_on_the_sampler() {
        let sampler = Arc::new(SlowSampler(Duration::from_millis(500)));
        let config = SamplerConfig::new("slow").with_time_limit(0.02);

        let start = Instant::now();
        let result = run_with_time_limit(sampler, one_variable_model(), config).await;
        assert!(matches!(result, Err(SamplerError::TimeLimit(limit)) if limit == 0.02));
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn sampler_within_budget_returns_its_samples() {
        let sampler = Arc::new(SlowSampler(Duration::from_millis(1)));
        let config = SamplerConfig::new("quick").with_time_limit(5.0);
        let sampleset = run_with_time_limit(sampler, one_variable_model(), config)
            .await
            .unwrap();
        assert_eq!(sampleset.info.problem_label, "quick");
    }

    #[tokio::test]
    async fn timed_out_run_keeps_its_slot_until_the_thread_ends() {
        let runs = Arc::new(Semaphore::new(1));
        let permit = runs.clone().acquire_owned().await.unwrap();
        let sampler = Arc::new(SlowSampler(Duration::from_millis(200)));
        let config = SamplerConfig::new("slow").with_time_limit(0.01);

        let result = run_blocking(sampler, one_variable_model(), config, Some(permit)).await;
        assert!(matches!(result, Err(SamplerError::TimeLimit(_))));
        assert_eq!(runs.available_permits(), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(runs.available_permits(), 1);
    }
}

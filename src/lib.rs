// Domain layer: constrained models, samples and the sampler contract
pub mod domain;

// Knapsack instances and their CQM formulation
pub mod knapsack;

// Sampler adapters: concrete implementations of Sampler
pub mod sampler;

// Application layer: wire messages and the gRPC service
pub mod application;

// Infrastructure layer: External concerns (gRPC server and client)
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    Assignment, ConstrainedQuadraticModel, Constraint, LinearExpression, Sample, SampleSet,
    SampleSetInfo, Sampler, SamplerBackend, SamplerConfig, SamplerError, Sense, VarId, Variable,
    Vartype,
};

pub use knapsack::{
    build_knapsack_cqm, GeneratorConfig, InstanceGenerator, Item, KnapsackInstance,
    KnapsackSelection,
};

pub use application::GrpcHybridSamplerService;

pub use infrastructure::{serve_listener, start_server, HybridSamplerClient, ServerConfig};

#[cfg(feature = "milp")]
pub use sampler::MilpSampler;
pub use sampler::{ExactCqmSampler, SamplerFactory};

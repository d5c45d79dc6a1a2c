// Sampler adapters: concrete implementations of Sampler

pub mod exact_sampler;
pub mod factory;
#[cfg(feature = "milp")]
pub mod milp_sampler;

pub use exact_sampler::{ExactCqmSampler, MAX_EXACT_VARIABLES};
pub use factory::SamplerFactory;
#[cfg(feature = "milp")]
pub use milp_sampler::MilpSampler;

// Domain module: constrained models, samples and the sampler contract

pub mod models;
pub mod sample_set;
pub mod sampler_service;
pub mod value_objects;

pub use models::*;
pub use sample_set::*;
pub use sampler_service::*;
pub use value_objects::*;

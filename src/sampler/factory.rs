#[cfg(not(feature = "milp"))]
use crate::domain::SamplerError;
use crate::domain::{Result, Sampler, SamplerBackend, SamplerConfig};
use crate::sampler::ExactCqmSampler;
#[cfg(feature = "milp")]
use crate::sampler::MilpSampler;
use std::sync::Arc;

/// Factory for creating sampler instances based on configuration
pub struct SamplerFactory;

impl SamplerFactory {
    /// Create a sampler based on the run configuration
    pub fn create_sampler(config: &SamplerConfig) -> Result<Arc<dyn Sampler>> {
        Self::create_from_backend(config.backend)
    }

    /// Create a sampler for a specific backend
    pub fn create_from_backend(backend: SamplerBackend) -> Result<Arc<dyn Sampler>> {
        match backend {
            SamplerBackend::Auto => Ok(Self::default_sampler()),
            SamplerBackend::Exact => Ok(Arc::new(ExactCqmSampler::new())),
            #[cfg(feature = "milp")]
            SamplerBackend::Milp => Ok(Arc::new(MilpSampler::new())),
            #[cfg(not(feature = "milp"))]
            SamplerBackend::Milp => Err(SamplerError::Unsupported {
                sampler: backend.to_string(),
                reason: "built without the `milp` feature".to_string(),
            }),
        }
    }

    /// Get the default sampler (MILP when available, exact enumeration otherwise)
    pub fn default_sampler() -> Arc<dyn Sampler> {
        #[cfg(feature = "milp")]
        {
            Arc::new(MilpSampler::new())
        }
        #[cfg(not(feature = "milp"))]
        {
            Arc::new(ExactCqmSampler::new())
        }
    }

    /// Backends compiled into this build
    pub fn available_backends() -> Vec<SamplerBackend> {
        let mut backends = vec![SamplerBackend::Exact];
        if cfg!(feature = "milp") {
            backends.push(SamplerBackend::Milp);
        }
        backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_backend_is_always_available() {
        let sampler = SamplerFactory::create_from_backend(SamplerBackend::Exact).unwrap();
        assert_eq!(sampler.name(), "Exact");
        assert!(SamplerFactory::available_backends().contains(&SamplerBackend::Exact));
    }

    #[cfg(feature = "milp")]
    #[test]
    fn auto_prefers_milp() {
        let sampler = SamplerFactory::create_sampler(&SamplerConfig::default()).unwrap();
        assert_eq!(sampler.name(), "MILP");
    }
}

// Domain service interface for sampling constrained models
// Any local or remote sampler implements this contract

use super::models::{ConstrainedQuadraticModel, SamplerConfig};
use super::sample_set::SampleSet;

/// Error types for model construction and sampling
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid sampler configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported by {sampler}: {reason}")]
    Unsupported { sampler: String, reason: String },

    #[error("Time limit of {0}s exceeded")]
    TimeLimit(f64),

    #[error("Sampler execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote sampler error: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, SamplerError>;

/// Domain service interface for samplers
///
/// Samplers never mutate the model they are handed.
pub trait Sampler: Send + Sync {
    /// Sample a constrained model
    fn sample_cqm(
        &self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<SampleSet>;

    /// Validate a model without sampling it
    fn validate(&self, model: &ConstrainedQuadraticModel) -> Result<()> {
        let mut errors = Vec::new();

        for var in &model.variables {
            if var.lower_bound > var.upper_bound {
                errors.push(format!(
                    "Variable {} has lower bound ({}) > upper bound ({})",
                    var.id, var.lower_bound, var.upper_bound
                ));
            }
        }

        if let Some(max) = self.max_variables() {
            if model.num_variables() > max {
                return Err(SamplerError::InvalidModel(format!(
                    "{} variables exceed the {} sampler limit of {}",
                    model.num_variables(),
                    self.name(),
                    max
                )));
            }
        }

        if !self.supports_integer() && !model.is_binary() {
            return Err(SamplerError::Unsupported {
                sampler: self.name().to_string(),
                reason: "model has non-binary variables".to_string(),
            });
        }

        let expressions = std::iter::once(("objective", &model.objective)).chain(
            model
                .constraints
                .iter()
                .map(|c| (c.label.as_str(), &c.lhs)),
        );
        for (context, expr) in expressions {
            for v in expr.variables() {
                if model.variable(v).is_none() {
                    errors.push(format!("{} references undeclared variable {}", context, v));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SamplerError::InvalidModel(errors.join("; ")))
        }
    }

    /// Get the name of this sampler backend
    fn name(&self) -> &str;

    /// Check if this sampler handles integer (non-binary) variables
    fn supports_integer(&self) -> bool;

    /// Largest model this sampler accepts, if bounded
    fn max_variables(&self) -> Option<usize> {
        None
    }
}

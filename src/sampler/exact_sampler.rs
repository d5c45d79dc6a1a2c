// Exhaustive sampler: evaluates every assignment of a binary model

use crate::domain::{
    Assignment, ConstrainedQuadraticModel, Result, Sample, SampleSet, SampleSetInfo, Sampler,
    SamplerConfig, SamplerError,
};
use log::debug;
use std::time::Instant;

/// Largest model the exact sampler will enumerate (2^16 samples)
pub const MAX_EXACT_VARIABLES: usize = 16;

const TIME_CHECK_INTERVAL: u64 = 1024;

pub struct ExactCqmSampler;

impl ExactCqmSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExactCqmSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for ExactCqmSampler {
    fn sample_cqm(
        &self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<SampleSet> {
        config.validate()?;
        self.validate(model)?;

        let n = model.num_variables();
        let start_time = Instant::now();
        let ids: Vec<_> = model.variables.iter().map(|v| v.id).collect();
        let total = 1u64 << n;
        let mut samples = Vec::with_capacity(total as usize);

        for mask in 0..total {
            if mask % TIME_CHECK_INTERVAL == 0 {
                if let Some(limit) = config.time_limit {
                    if start_time.elapsed().as_secs_f64() > limit {
                        return Err(SamplerError::TimeLimit(limit));
                    }
                }
            }
            let assignment: Assignment = ids
                .iter()
                .enumerate()
                .map(|(bit, &id)| (id, ((mask >> bit) & 1) as i64))
                .collect();
            samples.push(Sample::evaluate(model, assignment));
        }

        let run_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "Exact sampler evaluated {} assignments in {:.2} ms",
            total, run_time_ms
        );

        Ok(SampleSet::new(
            ids,
            samples,
            SampleSetInfo {
                sampler: self.name().to_string(),
                problem_label: config.label.clone(),
                run_time_ms,
            },
        ))
    }

    fn name(&self) -> &str {
        "Exact"
    }

    fn supports_integer(&self) -> bool {
        false
    }

    fn max_variables(&self) -> Option<usize> {
        Some(MAX_EXACT_VARIABLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Variable, VarId};
    use crate::knapsack::build_knapsack_cqm;

    #[test]
    fn enumerates_all_assignments() {
        let cqm = build_knapsack_cqm(&[5, 3], &[4, 2], 5).unwrap();
        let sampleset = ExactCqmSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::new("two-items"))
            .unwrap();

        assert_eq!(sampleset.len(), 4);
        assert_eq!(sampleset.info.problem_label, "two-items");

        let feasible = sampleset.feasible();
        let energies: Vec<i64> = feasible.iter().map(|s| s.energy).collect();
        assert_eq!(energies, vec![-5, -3, 0]);
    }

    #[test]
    fn zero_capacity_only_allows_empty_selection() {
        let cqm = build_knapsack_cqm(&[2, 7, 1], &[3, 1, 4], 0).unwrap();
        let feasible = ExactCqmSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap()
            .feasible();
        assert_eq!(feasible.len(), 1);
        let only = feasible.first().unwrap();
        assert!(only.assignment.values().all(|&x| x == 0));
        assert_eq!(only.energy, 0);
    }

    #[test]
    fn empty_model_yields_one_feasible_sample() {
        let cqm = build_knapsack_cqm(&[], &[], 3).unwrap();
        let sampleset = ExactCqmSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap();
        assert_eq!(sampleset.len(), 1);
        assert!(sampleset.first().unwrap().is_feasible);
        assert_eq!(sampleset.first().unwrap().energy, 0);
    }

    #[test]
    fn stops_when_the_time_limit_runs_out() {
        let n = MAX_EXACT_VARIABLES;
        let cqm = build_knapsack_cqm(&vec![3; n], &vec![2; n], 10).unwrap();
        let config = SamplerConfig::new("tight").with_time_limit(1e-7);
        assert!(matches!(
            ExactCqmSampler::new().sample_cqm(&cqm, &config),
            Err(SamplerError::TimeLimit(limit)) if limit == 1e-7
        ));
    }

    #[test]
    fn rejects_integer_variables() {
        let mut cqm = ConstrainedQuadraticModel::new();
        cqm.add_variable(Variable::integer(VarId(0), 0, 3)).unwrap();
        let err = ExactCqmSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap_err();
        assert!(matches!(err, SamplerError::Unsupported { .. }));
    }

    #[test]
    fn rejects_oversized_models() {
        let n = MAX_EXACT_VARIABLES + 1;
        let cqm = build_knapsack_cqm(&vec![1; n], &vec![1; n], 5).unwrap();
        assert!(matches!(
            ExactCqmSampler::new().sample_cqm(&cqm, &SamplerConfig::default()),
            Err(SamplerError::InvalidModel(_))
        ));
    }
}

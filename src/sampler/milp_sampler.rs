// MILP sampler adapter
// Translates the domain model to good_lp and solves it with the microlp backend

use crate::domain::{
    Assignment, ConstrainedQuadraticModel, Result, Sample, SampleSet, SampleSetInfo, Sampler,
    SamplerConfig, SamplerError, Sense, Vartype,
};
use good_lp::{
    solvers::microlp::microlp, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::time::Instant;

pub struct MilpSampler;

impl MilpSampler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MilpSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for MilpSampler {
    fn sample_cqm(
        &self,
        model: &ConstrainedQuadraticModel,
        config: &SamplerConfig,
    ) -> Result<SampleSet> {
        config.validate()?;
        self.validate(model)?;

        let start_time = Instant::now();
        let ids: Vec<_> = model.variables.iter().map(|v| v.id).collect();

        // Nothing to decide: the constraints are constants.
        if ids.is_empty() {
            let sample = Sample::evaluate(model, Assignment::new());
            let samples = if sample.is_feasible {
                vec![sample]
            } else {
                Vec::new()
            };
            let info = SampleSetInfo {
                sampler: self.name().to_string(),
                problem_label: config.label.clone(),
                run_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            };
            return Ok(SampleSet::new(ids, samples, info));
        }

        let mut vars = variables!();
        let mut lp_variables: BTreeMap<_, GoodLpVariable> = BTreeMap::new();

        for var_def in &model.variables {
            let var = match var_def.vartype {
                Vartype::Binary => vars.add(variable().binary()),
                Vartype::Integer => vars.add(
                    variable()
                        .integer()
                        .min(var_def.lower_bound as f64)
                        .max(var_def.upper_bound as f64),
                ),
            };
            lp_variables.insert(var_def.id, var);
        }

        let mut obj_expr: Expression = (model.objective.offset as f64).into();
        for (v, &coeff) in &model.objective.terms {
            if coeff != 0 {
                obj_expr += coeff as f64 * lp_variables[v];
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(microlp);

        for constraint in &model.constraints {
            let mut lhs: Expression = (constraint.lhs.offset as f64).into();
            for (v, &coeff) in &constraint.lhs.terms {
                if coeff != 0 {
                    lhs += coeff as f64 * lp_variables[v];
                }
            }

            let rhs = constraint.rhs as f64;
            lp_model = match constraint.sense {
                Sense::Le => lp_model.with(lhs.leq(rhs)),
                Sense::Ge => lp_model.with(lhs.geq(rhs)),
                Sense::Eq => lp_model.with(lhs.eq(rhs)),
            };
        }

        let solution_result = lp_model.solve();
        let run_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        if let Some(limit) = config.time_limit {
            if run_time_ms > limit * 1000.0 {
                warn!(
                    "MILP solve took {:.0} ms, over the {}s budget for '{}'",
                    run_time_ms, limit, config.label
                );
            }
        }

        let info = SampleSetInfo {
            sampler: self.name().to_string(),
            problem_label: config.label.clone(),
            run_time_ms,
        };

        match solution_result {
            Ok(sol) => {
                let assignment: Assignment = lp_variables
                    .iter()
                    .map(|(&id, &var)| (id, sol.value(var).round() as i64))
                    .collect();
                let sample = Sample::evaluate(model, assignment);
                debug!(
                    "MILP sampler found energy {} (feasible: {}) in {:.2} ms",
                    sample.energy, sample.is_feasible, run_time_ms
                );
                Ok(SampleSet::new(ids, vec![sample], info))
            }
            Err(ResolutionError::Infeasible) => {
                debug!("MILP sampler reports '{}' infeasible", config.label);
                Ok(SampleSet::empty(ids, info))
            }
            Err(ResolutionError::Unbounded) => Err(SamplerError::ExecutionFailed(
                "model is unbounded".to_string(),
            )),
            Err(e) => Err(SamplerError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "MILP"
    }

    fn supports_integer(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinearExpression, Variable, VarId};
    use crate::knapsack::build_knapsack_cqm;

    #[test]
    fn solves_two_item_example() {
        let cqm = build_knapsack_cqm(&[5, 3], &[4, 2], 5).unwrap();
        let sampleset = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::new("two-items"))
            .unwrap();
        let best = sampleset.first().unwrap();
        assert!(best.is_feasible);
        assert_eq!(best.energy, -5);
        assert_eq!(best.value(VarId(0)), 1);
        assert_eq!(best.value(VarId(1)), 0);
    }

    #[test]
    fn no_items_gives_one_empty_feasible_sample() {
        let cqm = build_knapsack_cqm(&[], &[], 7).unwrap();
        let sampleset = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::new("empty"))
            .unwrap();
        assert_eq!(sampleset.len(), 1);
        let only = sampleset.first().unwrap();
        assert!(only.is_feasible);
        assert!(only.assignment.is_empty());
        assert_eq!(only.energy, 0);
    }

    #[test]
    fn constant_infeasible_model_returns_empty_sampleset() {
        let cqm = build_knapsack_cqm(&[], &[], -1).unwrap();
        let sampleset = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap();
        assert!(sampleset.is_empty());
    }

    #[test]
    fn zero_capacity_selects_nothing() {
        let cqm = build_knapsack_cqm(&[2, 7, 1], &[3, 1, 4], 0).unwrap();
        let sampleset = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap();
        let best = sampleset.first().unwrap();
        assert!(best.is_feasible);
        assert_eq!(best.energy, 0);
        assert!(best.assignment.values().all(|&x| x == 0));
    }

    #[test]
    fn infeasible_model_returns_empty_sampleset() {
        let mut cqm = ConstrainedQuadraticModel::new();
        cqm.add_variable(Variable::binary(VarId(0))).unwrap();
        let mut lhs = LinearExpression::new();
        lhs.set_linear(VarId(0), 1);
        cqm.add_constraint(lhs, Sense::Ge, 2, "impossible").unwrap();

        let sampleset = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap();
        assert!(sampleset.is_empty());
    }

    #[test]
    fn handles_integer_variables() {
        let mut cqm = ConstrainedQuadraticModel::new();
        cqm.add_variable(Variable::integer(VarId(0), 0, 10)).unwrap();
        let mut objective = LinearExpression::new();
        objective.set_linear(VarId(0), -2);
        cqm.set_objective(objective).unwrap();
        let mut lhs = LinearExpression::new();
        lhs.set_linear(VarId(0), 3);
        cqm.add_constraint(lhs, Sense::Le, 14, "cap").unwrap();

        let best = MilpSampler::new()
            .sample_cqm(&cqm, &SamplerConfig::default())
            .unwrap()
            .first()
            .cloned()
            .unwrap();
        assert_eq!(best.value(VarId(0)), 4);
        assert_eq!(best.energy, -8);
    }
}

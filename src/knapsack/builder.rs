use log::debug;

use crate::domain::{
    ConstrainedQuadraticModel, LinearExpression, Result, SamplerError, Sense, VarId, Variable,
};

/// Label of the single weight constraint
pub const CAPACITY_LABEL: &str = "capacity";

/// Parallel item arrays must describe the same number of items.
pub(crate) fn check_item_lengths(values: &[i64], weights: &[i64]) -> Result<()> {
    if values.len() != weights.len() {
        return Err(SamplerError::InvalidModel(format!(
            "{} values but {} weights",
            values.len(),
            weights.len()
        )));
    }
    Ok(())
}

/// Construct a CQM for the 0/1 knapsack problem.
///
/// One binary variable per item. The objective minimizes `-sum(values[i] * x_i)`,
/// which maximizes total value; the `capacity` constraint keeps
/// `sum(weights[i] * x_i) <= capacity`.
pub fn build_knapsack_cqm(
    values: &[i64],
    weights: &[i64],
    capacity: i64,
) -> Result<ConstrainedQuadraticModel> {
    check_item_lengths(values, weights)?;
    if let Some(i) = values.iter().position(|&v| v <= 0) {
        return Err(SamplerError::InvalidModel(format!(
            "value of item {} must be positive, got {}",
            i, values[i]
        )));
    }
    if let Some(i) = weights.iter().position(|&w| w <= 0) {
        return Err(SamplerError::InvalidModel(format!(
            "weight of item {} must be positive, got {}",
            i, weights[i]
        )));
    }

    debug!("Building a CQM for {} items", values.len());

    let mut cqm = ConstrainedQuadraticModel::new();
    let mut objective = LinearExpression::new();
    let mut constraint = LinearExpression::new();

    for (i, (&value, &weight)) in values.iter().zip(weights).enumerate() {
        let x = cqm.add_variable(Variable::binary(VarId(i)))?;
        objective.set_linear(x, -value);
        constraint.set_linear(x, weight);
    }

    cqm.set_objective(objective)?;
    cqm.add_constraint(constraint, Sense::Le, capacity, CAPACITY_LABEL)?;

    Ok(cqm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Assignment;

    #[test]
    fn two_item_example() {
        let cqm = build_knapsack_cqm(&[5, 3], &[4, 2], 5).unwrap();
        assert_eq!(cqm.num_variables(), 2);
        assert!(cqm.is_binary());
        assert_eq!(cqm.objective.to_string(), "-5*x0 - 3*x1");

        let capacity = cqm.constraint(CAPACITY_LABEL).unwrap();
        assert_eq!(capacity.to_string(), "capacity: 4*x0 + 2*x1 <= 5");

        let pick_second: Assignment = [(VarId(0), 0), (VarId(1), 1)].into_iter().collect();
        assert!(cqm.check_feasible(&pick_second));
        assert_eq!(cqm.energy(&pick_second), -3);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = build_knapsack_cqm(&[1, 2, 3], &[1, 2], 4).unwrap_err();
        assert!(matches!(err, SamplerError::InvalidModel(_)));
        assert!(err.to_string().contains("3 values but 2 weights"));
    }

    #[test]
    fn rejects_non_positive_items() {
        assert!(build_knapsack_cqm(&[1, 0], &[1, 1], 4).is_err());
        assert!(build_knapsack_cqm(&[1, 1], &[1, -2], 4).is_err());
    }

    #[test]
    fn empty_instance_has_no_variables() {
        let cqm = build_knapsack_cqm(&[], &[], 10).unwrap();
        assert_eq!(cqm.num_variables(), 0);
        assert_eq!(cqm.num_constraints(), 1);
        let nothing = Assignment::new();
        assert!(cqm.check_feasible(&nothing));
        assert_eq!(cqm.energy(&nothing), 0);
    }
}

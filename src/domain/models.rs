use std::collections::BTreeMap;
use std::fmt;

use super::sampler_service::{Result, SamplerError};
use super::value_objects::{SamplerBackend, Sense, VarId, Vartype};

/// Values assigned to decision variables. Variables without an entry read as 0.
pub type Assignment = BTreeMap<VarId, i64>;

/// Decision variable in a constrained model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub id: VarId,
    pub vartype: Vartype,
    pub lower_bound: i64,
    pub upper_bound: i64,
}

impl Variable {
    pub fn binary(id: VarId) -> Self {
        Self {
            id,
            vartype: Vartype::Binary,
            lower_bound: 0,
            upper_bound: 1,
        }
    }

    pub fn integer(id: VarId, lower_bound: i64, upper_bound: i64) -> Self {
        Self {
            id,
            vartype: Vartype::Integer,
            lower_bound,
            upper_bound,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.vartype == Vartype::Binary
    }
}

/// Sparse linear expression: sum of `coefficient * variable` plus a constant offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpression {
    pub terms: BTreeMap<VarId, i64>,
    pub offset: i64,
}

impl LinearExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable with a zero coefficient unless it is already present.
    pub fn add_variable(&mut self, v: VarId) {
        self.terms.entry(v).or_insert(0);
    }

    pub fn set_linear(&mut self, v: VarId, coefficient: i64) {
        self.terms.insert(v, coefficient);
    }

    /// Add `coefficient` to the existing coefficient of `v`.
    pub fn add_linear(&mut self, v: VarId, coefficient: i64) -> Result<()> {
        let entry = self.terms.entry(v).or_insert(0);
        *entry = entry.checked_add(coefficient).ok_or_else(|| {
            SamplerError::InvalidModel(format!("coefficient of variable {} overflows", v))
        })?;
        Ok(())
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn linear(&self, v: VarId) -> Option<i64> {
        self.terms.get(&v).copied()
    }

    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    pub fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.keys().copied()
    }

    /// Value of the expression under `assignment`. Saturates at the `i64`
    /// limits, which only assignments outside the variable bounds can reach.
    pub fn evaluate(&self, assignment: &Assignment) -> i64 {
        let total = self
            .terms
            .iter()
            .map(|(v, &c)| i128::from(c) * i128::from(assignment.get(v).copied().unwrap_or(0)))
            .fold(i128::from(self.offset), i128::saturating_add);
        i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
    }

    /// Smallest and largest value over all assignments within `bounds`.
    fn range(&self, bounds: impl Fn(VarId) -> (i64, i64)) -> (i128, i128) {
        let offset = i128::from(self.offset);
        self.terms
            .iter()
            .fold((offset, offset), |(lo, hi), (&v, &c)| {
                let (lb, ub) = bounds(v);
                let a = i128::from(c) * i128::from(lb);
                let b = i128::from(c) * i128::from(ub);
                (lo.saturating_add(a.min(b)), hi.saturating_add(a.max(b)))
            })
    }
}

impl fmt::Display for LinearExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (v, &c) in &self.terms {
            if first {
                if c < 0 {
                    write!(f, "-")?;
                }
                first = false;
            } else if c < 0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", c.abs(), v)?;
        }
        if self.offset != 0 || first {
            if first {
                write!(f, "{}", self.offset)?;
            } else if self.offset < 0 {
                write!(f, " - {}", -self.offset)?;
            } else {
                write!(f, " + {}", self.offset)?;
            }
        }
        Ok(())
    }
}

/// Labelled linear constraint `lhs <sense> rhs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub label: String,
    pub lhs: LinearExpression,
    pub sense: Sense,
    pub rhs: i64,
}

impl Constraint {
    pub fn new(label: impl Into<String>, lhs: LinearExpression, sense: Sense, rhs: i64) -> Self {
        Self {
            label: label.into(),
            lhs,
            sense,
            rhs,
        }
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.sense.holds(self.lhs.evaluate(assignment), self.rhs)
    }

    /// Amount by which the constraint is violated, 0 when satisfied.
    pub fn violation(&self, assignment: &Assignment) -> u64 {
        let lhs = self.lhs.evaluate(assignment);
        match self.sense {
            Sense::Le if lhs <= self.rhs => 0,
            Sense::Ge if lhs >= self.rhs => 0,
            _ => lhs.abs_diff(self.rhs),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {} {}", self.label, self.lhs, self.sense, self.rhs)
    }
}

/// Constrained model with a linear objective (minimized) and labelled linear constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstrainedQuadraticModel {
    pub variables: Vec<Variable>,
    pub objective: LinearExpression,
    pub constraints: Vec<Constraint>,
}

impl ConstrainedQuadraticModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Re-declaring an existing label with the same vartype is a no-op.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VarId> {
        if let Some(existing) = self.variable(variable.id) {
            if existing.vartype != variable.vartype {
                return Err(SamplerError::InvalidModel(format!(
                    "variable {} already declared as {}",
                    variable.id, existing.vartype
                )));
            }
            return Ok(variable.id);
        }
        let id = variable.id;
        self.variables.push(variable);
        Ok(id)
    }

    pub fn set_objective(&mut self, objective: LinearExpression) -> Result<()> {
        self.check_declared(&objective, "objective")?;
        self.objective = objective;
        Ok(())
    }

    /// Add a constraint and return its label.
    pub fn add_constraint(
        &mut self,
        lhs: LinearExpression,
        sense: Sense,
        rhs: i64,
        label: impl Into<String>,
    ) -> Result<&str> {
        let label = label.into();
        if self.constraint(&label).is_some() {
            return Err(SamplerError::InvalidModel(format!(
                "duplicate constraint label '{}'",
                label
            )));
        }
        self.check_declared(&lhs, &label)?;
        self.constraints.push(Constraint::new(label, lhs, sense, rhs));
        Ok(&self.constraints[self.constraints.len() - 1].label)
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }

    pub fn constraint(&self, label: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.label == label)
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_binary(&self) -> bool {
        self.variables.iter().all(Variable::is_binary)
    }

    pub fn energy(&self, assignment: &Assignment) -> i64 {
        self.objective.evaluate(assignment)
    }

    pub fn check_feasible(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Every term must reference a declared variable, and the expression
    /// must stay within `i64` for every assignment inside the bounds.
    fn check_declared(&self, expr: &LinearExpression, context: &str) -> Result<()> {
        if let Some(v) = expr.variables().find(|&v| self.variable(v).is_none()) {
            return Err(SamplerError::InvalidModel(format!(
                "{} references undeclared variable {}",
                context, v
            )));
        }
        let (lo, hi) = expr.range(|v| {
            self.variable(v)
                .map_or((0, 0), |var| (var.lower_bound, var.upper_bound))
        });
        if lo < i128::from(i64::MIN) || hi > i128::from(i64::MAX) {
            return Err(SamplerError::InvalidModel(format!(
                "{} can take values outside the 64-bit integer range",
                context
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ConstrainedQuadraticModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective")?;
        writeln!(f, "  {}", self.objective)?;
        writeln!(f, "Constraints")?;
        for constraint in &self.constraints {
            writeln!(f, "  {}", constraint)?;
        }
        write!(
            f,
            "Variables: {} ({} constraints)",
            self.num_variables(),
            self.num_constraints()
        )
    }
}

/// Configuration for a sampling run
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    pub backend: SamplerBackend,
    /// Problem label attached to the returned sample set
    pub label: String,
    /// Time budget in seconds
    pub time_limit: Option<f64>,
}

impl SamplerConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_backend(mut self, backend: SamplerBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.time_limit {
            Some(t) if !t.is_finite() || t <= 0.0 => Err(SamplerError::InvalidConfig(format!(
                "time_limit must be a positive number of seconds, got {}",
                t
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            backend: SamplerBackend::Auto,
            label: String::new(),
            time_limit: None,
        }
    }
}

// Domain value objects representing core modelling concepts

use std::fmt;
use std::str::FromStr;

/// Label of a decision variable. Knapsack items are labelled by their index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VarId {
    fn from(index: usize) -> Self {
        VarId(index)
    }
}

/// Domain of a decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vartype {
    /// Binary variable (x ∈ {0, 1})
    Binary,
    /// Bounded integer variable (x ∈ ℤ ∩ [lb, ub])
    Integer,
}

impl fmt::Display for Vartype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vartype::Binary => write!(f, "BINARY"),
            Vartype::Integer => write!(f, "INTEGER"),
        }
    }
}

/// Relation between the left-hand side of a constraint and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Less than or equal (≤)
    Le,
    /// Greater than or equal (≥)
    Ge,
    /// Equal (=)
    Eq,
}

impl Sense {
    pub fn holds(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Sense::Le => lhs <= rhs,
            Sense::Ge => lhs >= rhs,
            Sense::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => write!(f, "<="),
            Sense::Ge => write!(f, ">="),
            Sense::Eq => write!(f, "=="),
        }
    }
}

impl FromStr for Sense {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<=" => Ok(Sense::Le),
            ">=" => Ok(Sense::Ge),
            "==" | "=" => Ok(Sense::Eq),
            other => Err(format!("unknown constraint sense '{}'", other)),
        }
    }
}

/// Sampler backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerBackend {
    /// Automatically select best sampler
    #[default]
    Auto,
    /// Exhaustive enumeration of binary assignments
    Exact,
    /// Mixed-integer linear programming via good_lp
    Milp,
}

impl fmt::Display for SamplerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplerBackend::Auto => write!(f, "Auto"),
            SamplerBackend::Exact => write!(f, "Exact"),
            SamplerBackend::Milp => write!(f, "MILP"),
        }
    }
}

impl FromStr for SamplerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SamplerBackend::Auto),
            "exact" => Ok(SamplerBackend::Exact),
            "milp" => Ok(SamplerBackend::Milp),
            other => Err(format!(
                "unknown sampler backend '{}' (expected auto, exact or milp)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sense_round_trips_through_its_symbol() {
        for sense in [Sense::Le, Sense::Ge, Sense::Eq] {
            assert_eq!(sense.to_string().parse::<Sense>(), Ok(sense));
        }
        assert!("<>".parse::<Sense>().is_err());
    }

    #[test]
    fn sense_holds() {
        assert!(Sense::Le.holds(2, 5));
        assert!(!Sense::Le.holds(6, 5));
        assert!(Sense::Ge.holds(5, 5));
        assert!(!Sense::Eq.holds(4, 5));
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("MILP".parse::<SamplerBackend>(), Ok(SamplerBackend::Milp));
        assert_eq!("exact".parse::<SamplerBackend>(), Ok(SamplerBackend::Exact));
        assert!("cbc".parse::<SamplerBackend>().is_err());
    }
}

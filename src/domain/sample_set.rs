use std::fmt;

use super::models::{Assignment, ConstrainedQuadraticModel};
use super::value_objects::VarId;

/// One candidate solution returned by a sampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub assignment: Assignment,
    pub energy: i64,
    pub is_feasible: bool,
    pub num_occurrences: u32,
}

impl Sample {
    /// Evaluate `assignment` against `model`.
    pub fn evaluate(model: &ConstrainedQuadraticModel, assignment: Assignment) -> Self {
        Self {
            energy: model.energy(&assignment),
            is_feasible: model.check_feasible(&assignment),
            assignment,
            num_occurrences: 1,
        }
    }

    pub fn value(&self, v: VarId) -> i64 {
        self.assignment.get(&v).copied().unwrap_or(0)
    }
}

/// Metadata about the run that produced a sample set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSetInfo {
    pub sampler: String,
    pub problem_label: String,
    pub run_time_ms: f64,
}

/// Samples ordered by ascending energy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    pub variables: Vec<VarId>,
    samples: Vec<Sample>,
    pub info: SampleSetInfo,
}

impl SampleSet {
    pub fn new(variables: Vec<VarId>, mut samples: Vec<Sample>, info: SampleSetInfo) -> Self {
        samples.sort_by_key(|s| s.energy);
        Self {
            variables,
            samples,
            info,
        }
    }

    pub fn empty(variables: Vec<VarId>, info: SampleSetInfo) -> Self {
        Self::new(variables, Vec::new(), info)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Lowest-energy sample
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn num_occurrences(&self) -> u64 {
        self.samples.iter().map(|s| s.num_occurrences as u64).sum()
    }

    pub fn filter(&self, mut predicate: impl FnMut(&Sample) -> bool) -> SampleSet {
        SampleSet {
            variables: self.variables.clone(),
            samples: self.samples.iter().filter(|s| predicate(s)).cloned().collect(),
            info: self.info.clone(),
        }
    }

    pub fn feasible(&self) -> SampleSet {
        self.filter(|s| s.is_feasible)
    }

    /// Keep only the `n` lowest-energy samples.
    pub fn truncate(mut self, n: usize) -> SampleSet {
        self.samples.truncate(n);
        self
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl fmt::Display for SampleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_width = self.samples.len().saturating_sub(1).to_string().len();
        let col_widths: Vec<usize> = self
            .variables
            .iter()
            .map(|v| v.to_string().len().max(1))
            .collect();
        let energy_width = self
            .samples
            .iter()
            .map(|s| s.energy.to_string().len())
            .chain(std::iter::once("energy".len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:row_width$}", "")?;
        for (v, w) in self.variables.iter().zip(col_widths.iter().copied()) {
            write!(f, " {:>w$}", v.to_string())?;
        }
        writeln!(
            f,
            " {:>energy_width$} num_oc. is_feasible",
            "energy"
        )?;

        for (row, sample) in self.samples.iter().enumerate() {
            write!(f, "{:>row_width$}", row)?;
            for (v, w) in self.variables.iter().zip(col_widths.iter().copied()) {
                write!(f, " {:>w$}", sample.value(*v))?;
            }
            writeln!(
                f,
                " {:>energy_width$} {:>7} {:>11}",
                sample.energy,
                sample.num_occurrences,
                if sample.is_feasible { "True" } else { "False" }
            )?;
        }

        write!(
            f,
            "['INTEGER', {} rows, {} samples, {} variables]",
            self.samples.len(),
            self.num_occurrences(),
            self.variables.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[i64], energy: i64, is_feasible: bool) -> Sample {
        Sample {
            assignment: values
                .iter()
                .enumerate()
                .map(|(i, &v)| (VarId(i), v))
                .collect(),
            energy,
            is_feasible,
            num_occurrences: 1,
        }
    }

    fn sample_set() -> SampleSet {
        SampleSet::new(
            vec![VarId(0), VarId(1)],
            vec![
                sample(&[0, 1], -3, true),
                sample(&[1, 1], -8, false),
                sample(&[1, 0], -5, true),
            ],
            SampleSetInfo::default(),
        )
    }

    #[test]
    fn samples_are_sorted_by_energy() {
        let energies: Vec<i64> = sample_set().iter().map(|s| s.energy).collect();
        assert_eq!(energies, vec![-8, -5, -3]);
    }

    #[test]
    fn feasible_filter_keeps_order() {
        let feasible = sample_set().feasible();
        assert_eq!(feasible.len(), 2);
        assert_eq!(feasible.first().map(|s| s.energy), Some(-5));
        assert!(feasible.iter().all(|s| s.is_feasible));
    }

    #[test]
    fn display_renders_table_and_summary() {
        let text = sample_set().feasible().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("energy num_oc. is_feasible"));
        assert!(lines[1].starts_with("0 1 0     -5"));
        assert_eq!(lines[3], "['INTEGER', 2 rows, 2 samples, 2 variables]");
    }

    #[test]
    fn truncate_keeps_lowest_energies() {
        let top = sample_set().truncate(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top.first().map(|s| s.energy), Some(-8));
    }
}

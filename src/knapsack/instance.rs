use std::fmt;
use std::ops::Range;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::builder::{build_knapsack_cqm, check_item_lengths};
use crate::domain::{ConstrainedQuadraticModel, Result, Sample, SamplerError, VarId};

/// Freight item that can be loaded into the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub value: i64,
    pub weight: i64,
}

/// Ordered items plus the container's weight capacity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackInstance {
    pub items: Vec<Item>,
    pub capacity: i64,
}

impl KnapsackInstance {
    pub fn new(items: Vec<Item>, capacity: i64) -> Self {
        Self { items, capacity }
    }

    /// Pair up parallel `values` and `weights` arrays.
    pub fn from_arrays(values: &[i64], weights: &[i64], capacity: i64) -> Result<Self> {
        check_item_lengths(values, weights)?;
        let items = values
            .iter()
            .zip(weights)
            .map(|(&value, &weight)| Item { value, weight })
            .collect();
        Ok(Self::new(items, capacity))
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn values(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.value).collect()
    }

    pub fn weights(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.weight).collect()
    }

    pub fn build_model(&self) -> Result<ConstrainedQuadraticModel> {
        build_knapsack_cqm(&self.values(), &self.weights(), self.capacity)
    }

    /// Decode a sample of this instance's model into the selected items.
    pub fn selection(&self, sample: &Sample) -> KnapsackSelection {
        let items: Vec<usize> = (0..self.items.len())
            .filter(|&i| sample.value(VarId(i)) != 0)
            .collect();
        let total_value = items.iter().map(|&i| self.items[i].value).sum();
        let total_weight = items.iter().map(|&i| self.items[i].weight).sum();
        KnapsackSelection {
            items,
            total_value,
            total_weight,
            capacity: self.capacity,
        }
    }
}

impl fmt::Display for KnapsackInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "values: {:?}", self.values())?;
        writeln!(f, "weights: {:?}", self.weights())?;
        write!(f, "weight_capacity: {}", self.capacity)
    }
}

/// Items picked by a sample, with their totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackSelection {
    pub items: Vec<usize>,
    pub total_value: i64,
    pub total_weight: i64,
    pub capacity: i64,
}

impl KnapsackSelection {
    pub fn fits(&self) -> bool {
        self.total_weight <= self.capacity
    }
}

impl fmt::Display for KnapsackSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "items {:?}: value {}, weight {}/{}",
            self.items, self.total_value, self.total_weight, self.capacity
        )
    }
}

/// Parameters of the random instance generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub num_items: usize,
    pub value_range: Range<i64>,
    pub weight_range: Range<i64>,
    pub capacity_range: Range<i64>,
    /// Fixed seed for reproducible instances; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_items: 12,
            value_range: 1..10,
            weight_range: 1..10,
            capacity_range: 12..40,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_num_items(mut self, num_items: usize) -> Self {
        self.num_items = num_items;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        let ranges = [
            ("value_range", &self.value_range, 1),
            ("weight_range", &self.weight_range, 1),
            ("capacity_range", &self.capacity_range, 0),
        ];
        for (name, range, min) in ranges {
            if range.is_empty() || range.start < min {
                return Err(SamplerError::InvalidConfig(format!(
                    "{} {:?} must be non-empty and start at or above {}",
                    name, range, min
                )));
            }
        }
        Ok(())
    }
}

/// Uniform random knapsack instances from an explicit RNG
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl InstanceGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn generate(&mut self) -> KnapsackInstance {
        let values: Vec<i64> = (0..self.config.num_items)
            .map(|_| self.rng.gen_range(self.config.value_range.clone()))
            .collect();
        let weights: Vec<i64> = (0..self.config.num_items)
            .map(|_| self.rng.gen_range(self.config.weight_range.clone()))
            .collect();
        let capacity = self.rng.gen_range(self.config.capacity_range.clone());

        info!(
            "Generated knapsack instance with {} items, capacity {}",
            self.config.num_items, capacity
        );

        let items = values
            .into_iter()
            .zip(weights)
            .map(|(value, weight)| Item { value, weight })
            .collect();
        KnapsackInstance::new(items, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Assignment;

    #[test]
    fn same_seed_same_instance() {
        let config = GeneratorConfig::default().with_seed(42);
        let a = InstanceGenerator::new(config.clone()).unwrap().generate();
        let b = InstanceGenerator::new(config).unwrap().generate();
        assert_eq!(a, b);
    }

    #[test]
    fn generated_values_stay_in_range() {
        let mut generator =
            InstanceGenerator::new(GeneratorConfig::default().with_num_items(50).with_seed(7))
                .unwrap();
        for _ in 0..20 {
            let instance = generator.generate();
            assert_eq!(instance.num_items(), 50);
            assert!(instance.items.iter().all(|i| (1..10).contains(&i.value)));
            assert!(instance.items.iter().all(|i| (1..10).contains(&i.weight)));
            assert!((12..40).contains(&instance.capacity));
        }
    }

    #[test]
    fn rejects_empty_ranges() {
        let config = GeneratorConfig {
            value_range: 5..5,
            ..GeneratorConfig::default()
        };
        assert!(InstanceGenerator::new(config).is_err());
    }

    #[test]
    fn from_arrays_rejects_mismatched_lengths() {
        let err = KnapsackInstance::from_arrays(&[1, 2], &[1], 4).unwrap_err();
        assert!(matches!(err, SamplerError::InvalidModel(_)));
        assert!(err.to_string().contains("2 values but 1 weights"));
    }

    #[test]
    fn selection_totals() {
        let instance = KnapsackInstance::from_arrays(&[5, 3, 4], &[4, 2, 3], 5).unwrap();
        let assignment: Assignment = [(VarId(1), 1), (VarId(2), 1)].into_iter().collect();
        let model = instance.build_model().unwrap();
        let selection = instance.selection(&Sample::evaluate(&model, assignment));
        assert_eq!(selection.items, vec![1, 2]);
        assert_eq!(selection.total_value, 7);
        assert_eq!(selection.total_weight, 5);
        assert!(selection.fits());
    }
}
